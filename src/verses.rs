/// A single passage offered for practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerseEntry {
    pub text: &'static str,
    pub reference: &'static str,
}

impl VerseEntry {
    pub const fn new(text: &'static str, reference: &'static str) -> Self {
        Self { text, reference }
    }

    /// Length of the text in chars, which is what progress is measured in
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

static VERSES: [VerseEntry; 8] = [
    VerseEntry::new(
        "For God so loved the world that he gave his one and only Son, that whoever believes in him shall not perish but have eternal life.",
        "John 3:16",
    ),
    VerseEntry::new(
        "I can do all things through Christ who strengthens me.",
        "Philippians 4:13",
    ),
    VerseEntry::new(
        "Trust in the Lord with all your heart and lean not on your own understanding; in all your ways submit to him, and he will make your paths straight.",
        "Proverbs 3:5-6",
    ),
    VerseEntry::new(
        "The Lord is my shepherd, I lack nothing. He makes me lie down in green pastures, he leads me beside quiet waters, he refreshes my soul.",
        "Psalm 23:1-3",
    ),
    VerseEntry::new(
        "Be strong and courageous. Do not be afraid; do not be discouraged, for the Lord your God will be with you wherever you go.",
        "Joshua 1:9",
    ),
    VerseEntry::new(
        "And we know that in all things God works for the good of those who love him, who have been called according to his purpose.",
        "Romans 8:28",
    ),
    VerseEntry::new(
        "But the fruit of the Spirit is love, joy, peace, forbearance, kindness, goodness, faithfulness, gentleness and self-control.",
        "Galatians 5:22-23",
    ),
    VerseEntry::new(
        "Love is patient, love is kind. It does not envy, it does not boast, it is not proud.",
        "1 Corinthians 13:4",
    ),
];

/// The compiled-in practice table, in presentation order
pub fn all() -> &'static [VerseEntry] {
    &VERSES
}

pub fn count() -> usize {
    VERSES.len()
}

/// Entry at `index`, wrapping out-of-range indices around the table
pub fn get(index: usize) -> &'static VerseEntry {
    &VERSES[index % VERSES.len()]
}

/// Index that follows `index` in a table of `len` entries, wrapping to 0
pub fn next_index(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index + 1) % len
}
