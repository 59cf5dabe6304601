//! SASLprep (RFC 4013) for revision 5 passwords.
//!
//! Unassigned code points (RFC 3454 table A.1) are accepted, so passwords
//! using characters newer than Unicode 3.2 still work.

use crate::error::{PdfError, Result};
use unicode_normalization::UnicodeNormalization;

type Table = &'static [(u32, u32)];

/// B.1, commonly mapped to nothing.
const MAPPED_TO_NOTHING: Table = &[
    (0x00AD, 0x00AD),
    (0x034F, 0x034F),
    (0x1806, 0x1806),
    (0x180B, 0x180D),
    (0x200B, 0x200D),
    (0x2060, 0x2060),
    (0xFE00, 0xFE0F),
    (0xFEFF, 0xFEFF),
];

/// C.1.2, non-ASCII space characters.
const NON_ASCII_SPACE: Table = &[
    (0x00A0, 0x00A0),
    (0x1680, 0x1680),
    (0x2000, 0x200B),
    (0x202F, 0x202F),
    (0x205F, 0x205F),
    (0x3000, 0x3000),
];

/// C.2.1 through C.9 merged and sorted.
const PROHIBITED: Table = &[
    (0x0000, 0x001F),
    (0x007F, 0x009F),
    (0x0340, 0x0341),
    (0x06DD, 0x06DD),
    (0x070F, 0x070F),
    (0x180E, 0x180E),
    (0x200C, 0x200F),
    (0x2028, 0x202E),
    (0x2060, 0x2063),
    (0x206A, 0x206F),
    (0x2FF0, 0x2FFB),
    (0xD800, 0xF8FF),
    (0xFDD0, 0xFDEF),
    (0xFEFF, 0xFEFF),
    (0xFFF9, 0xFFFF),
    (0x1D173, 0x1D17A),
    (0x1FFFE, 0x1FFFF),
    (0x2FFFE, 0x2FFFF),
    (0x3FFFE, 0x3FFFF),
    (0x4FFFE, 0x4FFFF),
    (0x5FFFE, 0x5FFFF),
    (0x6FFFE, 0x6FFFF),
    (0x7FFFE, 0x7FFFF),
    (0x8FFFE, 0x8FFFF),
    (0x9FFFE, 0x9FFFF),
    (0xAFFFE, 0xAFFFF),
    (0xBFFFE, 0xBFFFF),
    (0xCFFFE, 0xCFFFF),
    (0xDFFFE, 0xDFFFF),
    (0xE0001, 0xE0001),
    (0xE0020, 0xE007F),
    (0xEFFFE, 0xEFFFF),
    (0xF0000, 0xFFFFD),
    (0xFFFFE, 0xFFFFF),
    (0x100000, 0x10FFFF),
];

/// D.1, characters with bidi property R or AL.
const RAND_AL_CAT: Table = &[
    (0x05BE, 0x05BE),
    (0x05C0, 0x05C0),
    (0x05C3, 0x05C3),
    (0x05D0, 0x05EA),
    (0x05F0, 0x05F4),
    (0x061B, 0x061B),
    (0x061F, 0x061F),
    (0x0621, 0x063A),
    (0x0640, 0x064A),
    (0x066D, 0x066F),
    (0x0671, 0x06D5),
    (0x06DD, 0x06DD),
    (0x06E5, 0x06E6),
    (0x06FA, 0x06FE),
    (0x0700, 0x070D),
    (0x0710, 0x0710),
    (0x0712, 0x072C),
    (0x0780, 0x07A5),
    (0x07B1, 0x07B1),
    (0x200F, 0x200F),
    (0xFB1D, 0xFB1D),
    (0xFB1F, 0xFB28),
    (0xFB2A, 0xFB36),
    (0xFB38, 0xFB3C),
    (0xFB3E, 0xFB3E),
    (0xFB40, 0xFB41),
    (0xFB43, 0xFB44),
    (0xFB46, 0xFBB1),
    (0xFBD3, 0xFD3D),
    (0xFD50, 0xFD8F),
    (0xFD92, 0xFDC7),
    (0xFDF0, 0xFDFC),
    (0xFE70, 0xFE74),
    (0xFE76, 0xFEFC),
];

/// D.2, characters with bidi property L (the scripts passwords realistically use).
const L_CAT: Table = &[
    (0x0041, 0x005A),
    (0x0061, 0x007A),
    (0x00AA, 0x00AA),
    (0x00B5, 0x00B5),
    (0x00BA, 0x00BA),
    (0x00C0, 0x00D6),
    (0x00D8, 0x00F6),
    (0x00F8, 0x0220),
    (0x0222, 0x0233),
    (0x0250, 0x02AD),
    (0x02B0, 0x02B8),
    (0x02BB, 0x02C1),
    (0x02D0, 0x02D1),
    (0x02E0, 0x02E4),
    (0x02EE, 0x02EE),
    (0x037A, 0x037A),
    (0x0386, 0x0386),
    (0x0388, 0x038A),
    (0x038C, 0x038C),
    (0x038E, 0x03A1),
    (0x03A3, 0x03CE),
    (0x03D0, 0x03F5),
    (0x0400, 0x0482),
    (0x048A, 0x04CE),
    (0x04D0, 0x04F5),
    (0x04F8, 0x04F9),
    (0x0500, 0x050F),
    (0x0531, 0x0556),
    (0x0559, 0x055F),
    (0x0561, 0x0587),
    (0x0589, 0x0589),
    (0x0903, 0x0939),
    (0x093D, 0x0940),
    (0x0949, 0x094C),
    (0x0950, 0x0950),
    (0x0E01, 0x0E30),
    (0x3005, 0x3007),
    (0x3021, 0x3029),
    (0x3031, 0x3035),
    (0x3038, 0x303C),
    (0x3041, 0x3096),
    (0x309D, 0x309F),
    (0x30A1, 0x30FA),
    (0x30FC, 0x30FF),
    (0x3105, 0x312C),
    (0x3131, 0x318E),
    (0x3400, 0x4DB5),
    (0x4E00, 0x9FA5),
    (0xAC00, 0xD7A3),
    (0xFF21, 0xFF3A),
    (0xFF41, 0xFF5A),
    (0xFF66, 0xFFBE),
];

fn in_table(table: Table, c: char) -> bool {
    let cp = c as u32;
    table
        .binary_search_by(|&(lo, hi)| {
            if hi < cp {
                std::cmp::Ordering::Less
            } else if lo > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

fn rejected(reason: &str) -> PdfError {
    PdfError::Validation(format!("password failed SASLprep: {reason}"))
}

/// Maps, normalizes (NFKC) and checks `input`.
pub fn saslprep(input: &str) -> Result<String> {
    let mapped: String = input
        .chars()
        .filter(|&c| !in_table(MAPPED_TO_NOTHING, c))
        .map(|c| if in_table(NON_ASCII_SPACE, c) { ' ' } else { c })
        .collect();
    let normalized: String = mapped.nfkc().collect();

    if normalized
        .chars()
        .any(|c| in_table(PROHIBITED, c) || in_table(NON_ASCII_SPACE, c))
    {
        return Err(rejected("prohibited character"));
    }

    let has_rand_al = normalized.chars().any(|c| in_table(RAND_AL_CAT, c));
    if has_rand_al {
        if normalized.chars().any(|c| in_table(L_CAT, c)) {
            return Err(rejected("mixed bidirectional text"));
        }
        let first = normalized.chars().next();
        let last = normalized.chars().next_back();
        let wrapped = matches!((first, last), (Some(f), Some(l)) if in_table(RAND_AL_CAT, f) && in_table(RAND_AL_CAT, l));
        if !wrapped {
            return Err(rejected("right-to-left text must start and end with a right-to-left character"));
        }
    }

    Ok(normalized)
}
