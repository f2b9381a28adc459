use {
    anyhow::{Context as _, Result, bail},
    bytes::Bytes,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormPart {
    pub fn text(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.data)?)
    }
}

/// Splits a `multipart/form-data` body into its parts, in order.
pub fn parse_multipart(content_type: &str, body: &[u8]) -> Result<Vec<FormPart>> {
    let boundary = boundary(content_type)?;
    let delimiter = format!("--{boundary}").into_bytes();
    let mut pos = find(body, &delimiter, 0).context("missing first boundary")?;
    let mut parts = Vec::new();
    loop {
        pos += delimiter.len();
        let rest = body.get(pos..).context("truncated body")?;
        if rest.starts_with(b"--") {
            return Ok(parts);
        }
        let start = pos + crlf_len(rest)?;
        let mut closing = b"\r\n".to_vec();
        closing.extend_from_slice(&delimiter);
        let end = find(body, &closing, start).context("unterminated part")?;
        parts.push(parse_part(body.get(start..end).context("bad part bounds")?)?);
        pos = end + 2;
    }
}

fn boundary(content_type: &str) -> Result<&str> {
    let (mime, params) = content_type
        .split_once(';')
        .context("content type has no parameters")?;
    if !mime.trim().eq_ignore_ascii_case("multipart/form-data") {
        bail!("not a multipart/form-data body: {content_type:?}");
    }
    params
        .split(';')
        .filter_map(|param| param.trim().strip_prefix("boundary="))
        .map(|value| value.trim_matches('"'))
        .next()
        .context("missing boundary")
}

fn crlf_len(rest: &[u8]) -> Result<usize> {
    if rest.starts_with(b"\r\n") {
        Ok(2)
    } else {
        bail!("boundary not followed by CRLF")
    }
}

fn parse_part(raw: &[u8]) -> Result<FormPart> {
    let split = find(raw, b"\r\n\r\n", 0).context("part without header terminator")?;
    let headers = std::str::from_utf8(raw.get(..split).context("bad header bounds")?)?;
    let data = Bytes::copy_from_slice(raw.get(split + 4..).context("bad data bounds")?);

    let mut name = None;
    let mut file_name = None;
    let mut content_type = None;
    for line in headers.split("\r\n") {
        let (header, value) = line.split_once(':').context("malformed header")?;
        let value = value.trim();
        if header.eq_ignore_ascii_case("content-disposition") {
            for param in value.split(';').map(str::trim) {
                if let Some(v) = param.strip_prefix("name=") {
                    name = Some(v.trim_matches('"').to_owned());
                } else if let Some(v) = param.strip_prefix("filename=") {
                    file_name = Some(v.trim_matches('"').to_owned());
                }
            }
        } else if header.eq_ignore_ascii_case("content-type") {
            content_type = Some(value.to_owned());
        }
    }
    Ok(FormPart {
        name: name.context("part without name")?,
        file_name,
        content_type,
        data,
    })
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|index| index + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_and_file_parts() {
        let body = b"--XyZ\r\n\
            Content-Disposition: form-data; name=\"encryptedFile\"; filename=\"blob\"\r\n\
            Content-Type: application/octet-stream\r\n\
            \r\n\
            \x00\x01\r\n\x02\r\n\
            --XyZ\r\n\
            Content-Disposition: form-data; name=\"originalName\"\r\n\
            \r\n\
            report.pdf\r\n\
            --XyZ--\r\n";
        let parts = parse_multipart("multipart/form-data; boundary=XyZ", body).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name, "encryptedFile");
        assert_eq!(parts[0].file_name.as_deref(), Some("blob"));
        assert_eq!(
            parts[0].content_type.as_deref(),
            Some("application/octet-stream")
        );
        assert_eq!(&parts[0].data[..], b"\x00\x01\r\n\x02");
        assert_eq!(parts[1].name, "originalName");
        assert_eq!(parts[1].file_name, None);
        assert_eq!(parts[1].text().unwrap(), "report.pdf");
    }

    #[test]
    fn rejects_other_content_types() {
        parse_multipart("application/json", b"{}").unwrap_err();
        parse_multipart("text/plain; charset=utf-8", b"").unwrap_err();
    }
}
