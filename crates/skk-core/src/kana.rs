//! Kana classification and form changes.

/// Hiragana letters that have a katakana counterpart at +0x60
/// (ぁ..ゖ plus the iteration marks ゝゞ).
fn is_shiftable_hiragana(c: char) -> bool {
    ('\u{3041}'..='\u{3096}').contains(&c) || ('\u{309D}'..='\u{309E}').contains(&c)
}

pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Convert hiragana to katakana, leaving everything else untouched.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if is_shiftable_hiragana(c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Convert katakana to hiragana, leaving everything else untouched.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            let shifted = (c as u32).checked_sub(0x60).and_then(char::from_u32);
            match shifted {
                Some(h) if is_katakana(c) && is_shiftable_hiragana(h) => h,
                _ => c,
            }
        })
        .collect()
}

/// Full-width form of a printable ASCII character (`a` → `ａ`, space →
/// ideographic space). Anything else is returned unchanged.
pub fn ascii_to_zenkaku(c: char) -> char {
    match c {
        ' ' => '\u{3000}',
        '!'..='~' => char::from_u32(c as u32 - 0x21 + 0xFF01).unwrap_or(c),
        _ => c,
    }
}

/// Okurigana class letter for the first kana of an okurigana tail.
///
/// Dictionary headwords for inflected words are the stem plus the romaji
/// consonant of the okurigana (`おくr` for 送る). Deriving it from the kana
/// rather than the typed keys keeps lookups independent of the input rule.
pub fn okuri_class(kana: char) -> Option<char> {
    let class = match kana {
        'あ' | 'ぁ' => 'a',
        'い' | 'ぃ' => 'i',
        'う' | 'ぅ' => 'u',
        'え' | 'ぇ' => 'e',
        'お' | 'ぉ' => 'o',
        'か' | 'き' | 'く' | 'け' | 'こ' => 'k',
        'が' | 'ぎ' | 'ぐ' | 'げ' | 'ご' => 'g',
        'さ' | 'し' | 'す' | 'せ' | 'そ' => 's',
        'じ' => 'j',
        'ざ' | 'ず' | 'ぜ' | 'ぞ' => 'z',
        'た' | 'ち' | 'つ' | 'て' | 'と' | 'っ' => 't',
        'だ' | 'ぢ' | 'づ' | 'で' | 'ど' => 'd',
        'な' | 'に' | 'ぬ' | 'ね' | 'の' | 'ん' => 'n',
        'は' | 'ひ' | 'ふ' | 'へ' | 'ほ' => 'h',
        'ば' | 'び' | 'ぶ' | 'べ' | 'ぼ' => 'b',
        'ぱ' | 'ぴ' | 'ぷ' | 'ぺ' | 'ぽ' => 'p',
        'ま' | 'み' | 'む' | 'め' | 'も' => 'm',
        'や' | 'ゆ' | 'よ' | 'ゃ' | 'ゅ' | 'ょ' => 'y',
        'ら' | 'り' | 'る' | 'れ' | 'ろ' => 'r',
        'わ' | 'を' | 'ゎ' => 'w',
        'ゔ' => 'v',
        _ => return None,
    };
    Some(class)
}
