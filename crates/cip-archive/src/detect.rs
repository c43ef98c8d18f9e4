use std::io::{self, Read, Seek};

/// Local file header, empty archive, and spanned archive signatures.
const SIGNATURES: [[u8; 4]; 3] = [
    [0x50, 0x4B, 0x03, 0x04],
    [0x50, 0x4B, 0x05, 0x06],
    [0x50, 0x4B, 0x07, 0x08],
];

pub fn has_zip_signature(data: &[u8]) -> bool {
    data.len() >= 4 && SIGNATURES.iter().any(|sig| data[..4] == *sig)
}

pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut header = [0u8; 4];
    let found = match reader.read_exact(&mut header) {
        Ok(()) => has_zip_signature(&header),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => false,
        Err(e) => return Err(e),
    };
    reader.rewind()?;
    Ok(found)
}
