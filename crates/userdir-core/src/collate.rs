//! Locale-aware string ordering for display names.
//!
//! Names are compared in levels: first by folded letters (case and Latin
//! diacritics removed, ligatures expanded), then by accents, then by case, and
//! finally by raw code points. Whitespace sorts before punctuation, punctuation before digits and
//! digits before letters. The final code point level makes the order total, so
//! two names compare equal only when they are the same string.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

/// Tertiary weight: plain lowercase, compatibility forms such as ligatures,
/// then uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Case {
    Lower,
    Compat,
    Upper,
}

#[derive(Debug, Clone, Copy)]
struct Element {
    class: CharClass,
    base: char,
    accented: bool,
    case: Case,
}

pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let left = elements(a);
    let right = elements(b);

    left.iter()
        .map(|e| (e.class, e.base))
        .cmp(right.iter().map(|e| (e.class, e.base)))
        .then_with(|| {
            left.iter()
                .map(|e| e.accented)
                .cmp(right.iter().map(|e| e.accented))
        })
        .then_with(|| left.iter().map(|e| e.case).cmp(right.iter().map(|e| e.case)))
        .then_with(|| a.cmp(b))
}

fn elements(s: &str) -> Vec<Element> {
    let mut out: Vec<Element> = Vec::with_capacity(s.len());
    for c in s.chars() {
        if is_combining_mark(c) {
            if let Some(last) = out.last_mut() {
                last.accented = true;
            }
            continue;
        }

        let upper = c.is_uppercase();
        for lower in c.to_lowercase() {
            if is_combining_mark(lower) {
                if let Some(last) = out.last_mut() {
                    last.accented = true;
                }
                continue;
            }

            let (folded, accented, case) = if let Some(base) = fold_latin(lower) {
                (base, true, if upper { Case::Upper } else { Case::Lower })
            } else if let Some((base, accented)) = fold_compat(lower) {
                (base, accented, if upper { Case::Upper } else { Case::Compat })
            } else {
                out.push(Element {
                    class: classify(lower),
                    base: lower,
                    accented: false,
                    case: if upper { Case::Upper } else { Case::Lower },
                });
                continue;
            };

            for base in folded.chars() {
                out.push(Element {
                    class: CharClass::Letter,
                    base,
                    accented,
                    case,
                });
            }
        }
    }
    out
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Punctuation
    }
}

fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
    )
}

/// Base letters for lowercase Latin-1 and Latin Extended-A letters.
fn fold_latin(c: char) -> Option<&'static str> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ţ' | 'ť' | 'ŧ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        _ => return None,
    };
    Some(base)
}

/// Compatibility ligatures and digraphs, with whether the expansion carries
/// an accent (`ǆ` is `d` followed by `ž`).
fn fold_compat(c: char) -> Option<(&'static str, bool)> {
    let folded = match c {
        'ﬀ' => ("ff", false),
        'ﬁ' => ("fi", false),
        'ﬂ' => ("fl", false),
        'ﬃ' => ("ffi", false),
        'ﬄ' => ("ffl", false),
        'ﬅ' | 'ﬆ' => ("st", false),
        'ĳ' => ("ij", false),
        'ǉ' => ("lj", false),
        'ǌ' => ("nj", false),
        'ǳ' => ("dz", false),
        'ǆ' => ("dz", true),
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut out: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        out.sort_by(|a, b| locale_compare(a, b));
        out
    }

    #[test]
    fn test_case_does_not_dominate() {
        assert_eq!(sorted(&["bob", "Alice", "carol"]), vec!["Alice", "bob", "carol"]);
        assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(locale_compare("alice", "Alice"), Ordering::Less);
        assert_eq!(locale_compare("Alice", "alice"), Ordering::Greater);
    }

    #[test]
    fn test_accents_sort_next_to_base_letter() {
        assert_eq!(
            sorted(&["Zoe", "Émile", "Eve", "Ethan"]),
            vec!["Émile", "Ethan", "Eve", "Zoe"]
        );
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("résumé", "resumes"), Ordering::Less);
    }

    #[test]
    fn test_combining_marks_match_precomposed_primary() {
        let decomposed = "Jose\u{0301}";
        assert_eq!(locale_compare(decomposed, "Josh"), Ordering::Less);
        assert_eq!(locale_compare("Jose", decomposed), Ordering::Less);
    }

    #[test]
    fn test_expansions() {
        assert_eq!(locale_compare("Straße", "Strasse"), Ordering::Greater);
        assert_eq!(locale_compare("Straße", "Strast"), Ordering::Less);
    }

    #[test]
    fn test_ligatures_sort_as_their_letters() {
        let names = [
            "Þór", "Ivan", "Ĳssel", "Ingrid", "Dan", "ǅemal", "Dora", "ﬁona", "Frank", "Fabian",
        ];
        assert_eq!(
            sorted(&names),
            vec![
                "Dan", "Dora", "ǅemal", "Fabian", "ﬁona", "Frank", "Ĳssel", "Ingrid", "Ivan", "Þór",
            ]
        );
        assert_eq!(locale_compare("fiona", "ﬁona"), Ordering::Less);
        assert_eq!(locale_compare("ﬁona", "Fiona"), Ordering::Less);
    }

    #[test]
    fn test_character_classes() {
        assert_eq!(
            sorted(&["Anna", "9lives", "_x", " lead"]),
            vec![" lead", "_x", "9lives", "Anna"]
        );
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(locale_compare("Ann", "Anna"), Ordering::Less);
        assert_eq!(locale_compare("", "A"), Ordering::Less);
    }

    #[test]
    fn test_total_order() {
        assert_eq!(locale_compare("Same", "Same"), Ordering::Equal);
        let names = ["a", "A", "á", "Á", "b", "ab", "Ab", "aB"];
        for x in names {
            for y in names {
                assert_eq!(locale_compare(x, y), locale_compare(y, x).reverse());
                assert_eq!(locale_compare(x, y) == Ordering::Equal, x == y);
            }
        }
    }
}
