#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub enum CharClass {
    Pending,
    Correct,
    Incorrect,
}

/// One target character paired with how it has been typed so far
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct ClassifiedChar {
    pub char: char,
    pub class: CharClass,
}

pub fn classify_at(typed: &[char], target_char: char, idx: usize) -> CharClass {
    match typed.get(idx) {
        None => CharClass::Pending,
        Some(c) if *c == target_char => CharClass::Correct,
        Some(_) => CharClass::Incorrect,
    }
}

/// Classify every character of `target` against `typed`.
/// The result always has exactly one entry per target char; typed overflow is not shown.
pub fn classify(typed: &str, target: &str) -> Vec<ClassifiedChar> {
    let typed = typed.chars().collect::<Vec<char>>();

    target
        .chars()
        .enumerate()
        .map(|(idx, c)| ClassifiedChar {
            char: c,
            class: classify_at(&typed, c, idx),
        })
        .collect()
}

/// "typed/target" as shown in the stats bar
pub fn progress_label((typed, target): (usize, usize)) -> String {
    format!("{typed}/{target}")
}
