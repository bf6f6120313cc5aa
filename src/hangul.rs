//! Hangul syllable arithmetic.

const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const FINAL_COUNT: u32 = 28;

/// Compatibility jamo in final-consonant order; index 0 is "no final".
const FINALS: [Option<char>; 28] = [
    None,
    Some('ㄱ'),
    Some('ㄲ'),
    Some('ㄳ'),
    Some('ㄴ'),
    Some('ㄵ'),
    Some('ㄶ'),
    Some('ㄷ'),
    Some('ㄹ'),
    Some('ㄺ'),
    Some('ㄻ'),
    Some('ㄼ'),
    Some('ㄽ'),
    Some('ㄾ'),
    Some('ㄿ'),
    Some('ㅀ'),
    Some('ㅁ'),
    Some('ㅂ'),
    Some('ㅄ'),
    Some('ㅅ'),
    Some('ㅆ'),
    Some('ㅇ'),
    Some('ㅈ'),
    Some('ㅊ'),
    Some('ㅋ'),
    Some('ㅌ'),
    Some('ㅍ'),
    Some('ㅎ'),
];

/// Index of `jamo` as a final consonant. `ㄸ`, `ㅃ` and `ㅉ` never close a
/// syllable and yield `None`.
pub(crate) fn final_index(jamo: char) -> Option<u32> {
    FINALS
        .iter()
        .position(|candidate| *candidate == Some(jamo))
        .and_then(|index| u32::try_from(index).ok())
}

/// Final-consonant index of a precomposed syllable; `None` for non-syllables.
pub(crate) fn syllable_final(syllable: char) -> Option<u32> {
    let code = u32::from(syllable);
    if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
        return None;
    }
    Some((code - SYLLABLE_BASE) % FINAL_COUNT)
}

/// Adds `jamo` as the final consonant of an open syllable.
///
/// `None` when `syllable` is not a precomposed syllable, already has a final
/// consonant, or `jamo` cannot be a final.
pub(crate) fn attach_final(syllable: char, jamo: char) -> Option<char> {
    if syllable_final(syllable)? != 0 {
        return None;
    }
    let index = final_index(jamo)?;
    char::from_u32(u32::from(syllable) + index)
}
