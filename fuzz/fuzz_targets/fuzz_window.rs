#![no_main]

use arbitrary::Arbitrary;
use kwic::index::{KwicIndex, TermSet, WindowWidth};
use kwic::utils::{SimpleTokenizer, Tokenizer};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    line: &'a str,
    terms: Vec<&'a str>,
    width: u8,
}

fuzz_target!(|input: Input| {
    let Ok(width) = WindowWidth::new(input.width as usize) else {
        return;
    };

    let mut vocabulary = TermSet::default();
    for term in input.terms {
        vocabulary.insert(term);
    }

    let tokens = SimpleTokenizer::new().tokenize(input.line);
    let mut index = KwicIndex::new(width, '_');
    index.add_line(&vocabulary, &tokens, "");

    // Every window is full width with its term in the middle
    for term in index.terms() {
        for occ in index.occurrences(term) {
            assert_eq!(occ.window.len(), width.get());
            assert_eq!(occ.window[width.center()], term);
        }
    }

    let bytes = kwic::index::save(&index).expect("save to memory");
    let reloaded = kwic::index::load(&bytes).expect("load what was saved");
    assert_eq!(reloaded, index);
});
