//! User access permissions (ISO 32000-1 Table 22).

/// How much printing the user password grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Printing {
    LowResolution,
    HighResolution,
}

/// Caller-facing permission switches. Everything defaults to denied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PermissionFlags {
    pub printing: Option<Printing>,
    pub modifying: bool,
    pub copying: bool,
    pub annotating: bool,
    pub filling_forms: bool,
    pub content_accessibility: bool,
    pub document_assembly: bool,
}

impl PermissionFlags {
    /// Every permission granted, printing at high resolution.
    pub fn all() -> Self {
        Self {
            printing: Some(Printing::HighResolution),
            modifying: true,
            copying: true,
            annotating: true,
            filling_forms: true,
            content_accessibility: true,
            document_assembly: true,
        }
    }
}

const PRINT: u32 = 1 << 2;
const MODIFY: u32 = 1 << 3;
const COPY: u32 = 1 << 4;
const ANNOTATE: u32 = 1 << 5;
const FILL_FORMS: u32 = 1 << 8;
const ACCESSIBILITY: u32 = 1 << 9;
const ASSEMBLE: u32 = 1 << 10;
const PRINT_HIGH_QUALITY: u32 = 1 << 11;

/// Packed `P` word of the encryption dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    bits: u32,
}

impl Permissions {
    /// Revision 2 packing. Only bits 3 to 6 are meaningful and any printing
    /// grant sets the print bit.
    pub fn revision2(flags: &PermissionFlags) -> Self {
        let mut bits = 0xFFFF_FFC0;
        if flags.printing.is_some() {
            bits |= PRINT;
        }
        if flags.modifying {
            bits |= MODIFY;
        }
        if flags.copying {
            bits |= COPY;
        }
        if flags.annotating {
            bits |= ANNOTATE;
        }
        Self { bits }
    }

    /// Revision 3 and later packing.
    pub fn revision3(flags: &PermissionFlags) -> Self {
        let mut bits = 0xFFFF_F0C0;
        match flags.printing {
            Some(Printing::LowResolution) => bits |= PRINT,
            Some(Printing::HighResolution) => bits |= PRINT | PRINT_HIGH_QUALITY,
            None => {}
        }
        if flags.modifying {
            bits |= MODIFY;
        }
        if flags.copying {
            bits |= COPY;
        }
        if flags.annotating {
            bits |= ANNOTATE;
        }
        if flags.filling_forms {
            bits |= FILL_FORMS;
        }
        if flags.content_accessibility {
            bits |= ACCESSIBILITY;
        }
        if flags.document_assembly {
            bits |= ASSEMBLE;
        }
        Self { bits }
    }

    pub fn for_revision(revision: u8, flags: &PermissionFlags) -> Self {
        if revision == 2 {
            Self::revision2(flags)
        } else {
            Self::revision3(flags)
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Value written as `/P`, a signed 32-bit integer.
    pub fn p_value(&self) -> i32 {
        self.bits as i32
    }

    /// Little-endian bytes as fed into key derivation.
    pub fn to_le_bytes(&self) -> [u8; 4] {
        self.bits.to_le_bytes()
    }

    pub fn can_print(&self) -> bool {
        self.bits & PRINT != 0
    }

    pub fn can_print_high_quality(&self) -> bool {
        self.bits & PRINT_HIGH_QUALITY != 0
    }

    pub fn can_copy(&self) -> bool {
        self.bits & COPY != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_deny_everything() {
        let flags = PermissionFlags::default();
        assert_eq!(Permissions::revision2(&flags).bits(), 0xFFFF_FFC0);
        assert_eq!(Permissions::revision3(&flags).bits(), 0xFFFF_F0C0);
        assert_eq!(Permissions::revision3(&flags).p_value(), -3904);
        assert_eq!(Permissions::revision2(&flags).p_value(), -64);
    }

    #[test]
    fn test_revision2_ignores_extended_flags() {
        let perms = Permissions::revision2(&PermissionFlags::all());
        assert_eq!(perms.bits(), 0xFFFF_FFC0 | 0b11_1100);
        assert!(!perms.can_print_high_quality());
    }

    #[test]
    fn test_revision3_printing_levels() {
        let low = PermissionFlags {
            printing: Some(Printing::LowResolution),
            ..Default::default()
        };
        let high = PermissionFlags {
            printing: Some(Printing::HighResolution),
            ..Default::default()
        };
        let low = Permissions::revision3(&low);
        let high = Permissions::revision3(&high);

        assert!(low.can_print());
        assert!(!low.can_print_high_quality());
        assert_eq!(high.bits() & 0b1000_0000_0100, 0b1000_0000_0100);
    }

    #[test]
    fn test_revision3_all_bits() {
        let perms = Permissions::revision3(&PermissionFlags::all());
        assert_eq!(perms.bits(), 0xFFFF_F0C0 | 0x0F3C);
        assert!(perms.can_copy());
    }

    #[test]
    fn test_little_endian_bytes() {
        let perms = Permissions::revision3(&PermissionFlags::default());
        assert_eq!(perms.to_le_bytes(), [0xC0, 0xF0, 0xFF, 0xFF]);
        assert_eq!(Permissions::for_revision(2, &PermissionFlags::default()).bits(), 0xFFFF_FFC0);
    }
}
