//! `Content-Type` and `Content-Disposition` header values

use std::fmt;

/// A parsed media type such as `multipart/form-data; boundary="b4d49894"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    /// `type/subtype`, lowercased
    pub essence: String,
    pub params: Vec<(String, String)>,
}

impl MediaType {
    pub fn new(essence: &str) -> Self {
        Self {
            essence: essence.trim().to_ascii_lowercase(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        self.params.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// Parse a header value. Returns `None` when there is no `type/subtype`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut segments = split_params(value).into_iter();
        let essence = segments.next()?.trim().to_ascii_lowercase();
        if !essence.contains('/') {
            return None;
        }
        Some(Self {
            essence,
            params: segments.filter_map(|s| parse_param(&s)).collect(),
        })
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn charset(&self) -> Option<&str> {
        self.param("charset").filter(|c| !c.is_empty())
    }

    pub fn boundary(&self) -> Option<&str> {
        self.param("boundary").filter(|b| !b.is_empty())
    }

    pub fn is_image(&self) -> bool {
        self.essence.starts_with("image")
    }

    pub fn is_multipart(&self) -> bool {
        self.essence.starts_with("multipart/")
    }

    /// Subtype after the slash, e.g. `form-data`
    pub fn subtype(&self) -> &str {
        self.essence
            .split_once('/')
            .map(|(_, s)| s)
            .unwrap_or_default()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.essence)?;
        for (name, value) in &self.params {
            write!(f, "; {}={}", name, quote_if_needed(value))?;
        }
        Ok(())
    }
}

/// A parsed `Content-Disposition` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    pub disposition: String,
    pub name: Option<String>,
    pub filename: Option<String>,
}

impl ContentDisposition {
    pub fn new(disposition: impl Into<String>) -> Self {
        Self {
            disposition: disposition.into(),
            name: None,
            filename: None,
        }
    }

    pub fn form_data(name: impl Into<String>) -> Self {
        Self::new("form-data").with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_filename(mut self, filename: Option<String>) -> Self {
        self.filename = filename;
        self
    }

    pub fn parse(value: &str) -> Option<Self> {
        let mut segments = split_params(value).into_iter();
        let disposition = segments.next()?.trim().to_string();
        if disposition.is_empty() {
            return None;
        }
        let mut parsed = Self::new(disposition);
        for (name, value) in segments.filter_map(|s| parse_param(&s)) {
            match name.as_str() {
                "name" => parsed.name = Some(value),
                "filename" => parsed.filename = Some(value),
                _ => {}
            }
        }
        Some(parsed)
    }
}

impl fmt::Display for ContentDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.disposition)?;
        if let Some(name) = &self.name {
            write!(f, "; name={}", quote(name))?;
        }
        if let Some(filename) = &self.filename {
            write!(f, "; filename={}", quote(filename))?;
        }
        Ok(())
    }
}

/// Split on `;` outside quoted strings
fn split_params(value: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in value.chars() {
        match c {
            _ if escaped => {
                current.push(c);
                escaped = false;
            }
            '\\' if in_quotes => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                current.push(c);
                in_quotes = !in_quotes;
            }
            ';' if !in_quotes => segments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    segments.push(current);
    segments
}

fn parse_param(segment: &str) -> Option<(String, String)> {
    let (name, value) = segment.split_once('=')?;
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }
    Some((name, unquote(value.trim())))
}

fn unquote(value: &str) -> String {
    match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(inner) => {
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                } else {
                    out.push(c);
                }
            }
            out
        }
        None => value.to_string(),
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn quote_if_needed(value: &str) -> String {
    let is_token = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c));
    if is_token {
        value.to_string()
    } else {
        quote(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_media_type() {
        let media = MediaType::parse("Application/JSON; charset=UTF-8").unwrap();
        assert_eq!(media.essence, "application/json");
        assert_eq!(media.charset(), Some("UTF-8"));
        assert!(!media.is_image());
        assert_eq!(media.subtype(), "json");
    }

    #[test]
    fn test_parse_quoted_boundary() {
        let media = MediaType::parse(r#"multipart/form-data; boundary="a;b c""#).unwrap();
        assert!(media.is_multipart());
        assert_eq!(media.boundary(), Some("a;b c"));
        assert_eq!(media.to_string(), r#"multipart/form-data; boundary="a;b c""#);
    }

    #[test]
    fn test_reject_missing_subtype() {
        assert!(MediaType::parse("garbage").is_none());
        assert!(MediaType::parse("").is_none());
    }

    #[test]
    fn test_image_detection() {
        assert!(MediaType::parse("image/jpeg").unwrap().is_image());
        assert!(MediaType::parse("IMAGE/PNG").unwrap().is_image());
        assert!(!MediaType::parse("text/plain").unwrap().is_image());
    }

    #[test]
    fn test_parse_disposition() {
        let cd = ContentDisposition::parse(r#"form-data; name=Selfie; filename="cat \"1\".jpg""#)
            .unwrap();
        assert_eq!(cd.disposition, "form-data");
        assert_eq!(cd.name.as_deref(), Some("Selfie"));
        assert_eq!(cd.filename.as_deref(), Some(r#"cat "1".jpg"#));
    }

    #[test]
    fn test_disposition_display_round_trips() {
        let cd = ContentDisposition::form_data("Selfie").with_filename(Some("a b.jpg".into()));
        let text = cd.to_string();
        assert_eq!(text, r#"form-data; name="Selfie"; filename="a b.jpg""#);
        assert_eq!(ContentDisposition::parse(&text), Some(cd));
    }
}
