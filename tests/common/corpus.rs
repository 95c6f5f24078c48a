//! Deterministic synthetic documents for splitter regression tests.

use entity_lines::{Entities, Entity};

const WORDS: &[&str] = &[
    "the", "annotation", "of", "named", "entities", "in", "Tokyo", "and", "São", "Paulo",
    "supercalifragilisticexpialidocious", "was", "reviewed", "by", "Dr.", "Müller", "on",
    "2024-03-01", "a", "中文文本", "label", "x",
];

const BREAKS: &[&str] = &[" ", " ", " ", " ", "  ", "\n", "\r\n", "\r", "\t", "\n\n"];

/// Seeded xorshift generator for reproducible corpora.
pub struct XorShift(u64);

impl XorShift {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407) | 1)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    pub fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

/// Text of roughly `words` words with mixed separators and terminators.
pub fn document(seed: u64, words: usize) -> String {
    let mut rng = XorShift::new(seed);
    let mut out = String::new();
    for i in 0..words {
        if i > 0 {
            out.push_str(BREAKS[rng.below(BREAKS.len())]);
        }
        out.push_str(WORDS[rng.below(WORDS.len())]);
    }
    out
}

/// Up to `count` entities over a text of `char_len` characters, labels in `1..=labels`.
pub fn entities(seed: u64, char_len: usize, count: usize, labels: u32) -> Entities {
    if char_len == 0 {
        return Entities::empty();
    }
    let mut rng = XorShift::new(seed ^ 0x5eed);
    let mut items = Vec::with_capacity(count);
    for id in 0..count as u64 {
        let start = rng.below(char_len);
        let len = 1 + rng.below(12);
        let end = (start + len).min(char_len);
        let label = 1 + rng.below(labels as usize) as u32;
        items.push(Entity::new(id, start, end, label));
    }
    Entities::new(items)
}
