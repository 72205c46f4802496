//! Line separator detection

use crate::config::Linesep;

/// Most frequent line separator in `source`
///
/// Ties, and sources without any line break, resolve to LF.
pub fn detect_linesep(source: &str) -> Linesep {
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut bytes = source.bytes().peekable();
    while let Some(byte) = bytes.next() {
        match byte {
            b'\r' if bytes.peek() == Some(&b'\n') => {
                bytes.next();
                crlf += 1;
            }
            b'\r' => cr += 1,
            b'\n' => lf += 1,
            _ => {}
        }
    }

    if crlf > lf && crlf > cr {
        Linesep::CrLf
    } else if cr > lf && cr > crlf {
        Linesep::Cr
    } else {
        Linesep::Lf
    }
}
