//! Upload content sniffing against the claimed extension

const ZIP: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
const OLE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Leading bytes each binary format must start with
fn signatures(extension: &str) -> Option<&'static [&'static [u8]]> {
    let sigs: &'static [&'static [u8]] = match extension {
        ".png" => &[&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]],
        ".jpg" | ".jpeg" => &[&[0xFF, 0xD8, 0xFF]],
        ".gif" => &[b"GIF87a", b"GIF89a"],
        ".pdf" => &[b"%PDF"],
        ".epub" | ".zip" | ".docx" | ".xlsx" | ".pptx" => &[ZIP],
        ".doc" | ".xls" | ".ppt" => &[OLE],
        _ => return None,
    };
    Some(sigs)
}

fn is_plain_text(extension: &str) -> bool {
    matches!(extension, ".txt" | ".md" | ".csv")
}

/// True when `data` looks like a file of `extension` (with the leading dot).
/// Unknown extensions are rejected.
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    let extension = extension.to_ascii_lowercase();
    if is_plain_text(&extension) {
        return !data.contains(&0);
    }

    signatures(&extension).is_some_and(|sigs| sigs.iter().any(|sig| data.starts_with(sig)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert!(validate_magic_bytes(&png, ".png"));
        assert!(validate_magic_bytes(&png, ".PNG"));
        assert!(!validate_magic_bytes(&png, ".jpg"));
        assert!(validate_magic_bytes(&[0xFF, 0xD8, 0xFF, 0xE0], ".jpeg"));
    }

    #[test]
    fn test_documents() {
        assert!(validate_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".docx"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".docx"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".epub"));
    }

    #[test]
    fn test_text_must_not_be_binary() {
        assert!(validate_magic_bytes(b"Chapter 1", ".txt"));
        assert!(!validate_magic_bytes(&[0x4D, 0x5A, 0x00, 0x90], ".txt"));
    }

    #[test]
    fn test_rejects_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".pdf"));
        assert!(!validate_magic_bytes(b"MZ", ".exe"));
    }
}
