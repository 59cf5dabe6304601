//! A deliberately small reader for the files this crate writes: it follows
//! `startxref` to the cross-reference table and trailer, and can look up
//! objects and single-line dictionary entries. Only meant for tests.

#![allow(dead_code)]

pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

pub struct MiniReader<'a> {
    data: &'a [u8],
    offsets: Vec<usize>,
    trailer: String,
}

impl<'a> MiniReader<'a> {
    pub fn parse(data: &'a [u8]) -> Self {
        let tail = data
            .windows(b"startxref\n".len())
            .rposition(|w| w == b"startxref\n")
            .expect("startxref keyword");
        let number = line_at(data, tail + b"startxref\n".len());
        let xref: usize = number.trim().parse().expect("startxref offset");

        assert_eq!(&data[xref..xref + 5], b"xref\n", "startxref points at xref");
        let subsection = line_at(data, xref + 5);
        let mut parts = subsection.split_whitespace();
        assert_eq!(parts.next(), Some("0"));
        let size: usize = parts.next().expect("entry count").parse().expect("number");

        let entries_start = xref + 5 + subsection.len() + 1;
        let mut offsets = Vec::with_capacity(size.saturating_sub(1));
        for i in 0..size {
            let entry = &data[entries_start + i * 20..entries_start + (i + 1) * 20];
            let entry = std::str::from_utf8(entry).expect("ascii xref entry");
            assert_eq!(entry.len(), 20);
            if i == 0 {
                assert_eq!(entry, "0000000000 65535 f \n");
                continue;
            }
            assert!(entry.ends_with(" 00000 n \n"), "bad entry {entry:?}");
            offsets.push(entry[..10].parse().expect("offset"));
        }

        let trailer_start = entries_start + size * 20;
        assert_eq!(&data[trailer_start..trailer_start + 8], b"trailer\n");
        let trailer_end = trailer_start + find(&data[trailer_start..], b"\nstartxref\n").expect("trailer end");
        let trailer = String::from_utf8_lossy(&data[trailer_start + 8..trailer_end]).into_owned();

        Self {
            data,
            offsets,
            trailer,
        }
    }

    pub fn object_count(&self) -> usize {
        self.offsets.len()
    }

    pub fn trailer(&self) -> &str {
        &self.trailer
    }

    /// Dictionary text of object `number`, checking the xref offset lands on
    /// its header.
    pub fn dictionary(&self, number: u32) -> String {
        let offset = self.offsets[number as usize - 1];
        let header = format!("{number} 0 obj\n");
        assert!(
            self.data[offset..].starts_with(header.as_bytes()),
            "xref entry for {number} points at {offset}"
        );
        let body = &self.data[offset + header.len()..];
        let endobj = find(body, b"\nendobj\n").expect("endobj keyword");
        let end = find(&body[..endobj], b"\nstream\n").unwrap_or(endobj);
        String::from_utf8_lossy(&body[..end]).into_owned()
    }

    /// Raw stream bytes of object `number`.
    pub fn stream(&self, number: u32) -> &'a [u8] {
        let offset = self.offsets[number as usize - 1];
        let body = offset + find(&self.data[offset..], b"\nstream\n").expect("stream keyword") + 8;
        let end = body + find(&self.data[body..], b"\nendstream\n").expect("endstream keyword");
        &self.data[body..end]
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

/// Value of `/key` in a dictionary laid out one entry per line.
pub fn entry<'s>(dict: &'s str, key: &str) -> Option<&'s str> {
    let needle = format!("\n/{key} ");
    let start = dict.find(&needle)? + needle.len();
    let end = dict[start..].find('\n').map_or(dict.len(), |i| start + i);
    Some(&dict[start..end])
}

/// Object number of an `n 0 R` entry.
pub fn reference(dict: &str, key: &str) -> Option<u32> {
    let value = entry(dict, key)?;
    let mut parts = value.split_whitespace();
    let number = parts.next()?.parse().ok()?;
    (parts.next() == Some("0") && parts.next() == Some("R")).then_some(number)
}

/// Object numbers in an array of references such as `/Kids [4 0 R 9 0 R]`.
pub fn references(dict: &str, key: &str) -> Vec<u32> {
    let value = entry(dict, key).unwrap_or("[]");
    let inner = value.trim_start_matches('[').trim_end_matches(']');
    inner
        .split_whitespace()
        .collect::<Vec<_>>()
        .chunks(3)
        .filter_map(|chunk| chunk.first()?.parse().ok())
        .collect()
}

fn line_at(data: &[u8], start: usize) -> &str {
    let end = start + data[start..].iter().position(|b| *b == b'\n').unwrap_or(data.len() - start);
    std::str::from_utf8(&data[start..end]).expect("ascii line")
}
