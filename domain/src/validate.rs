//! Candidate URL validation. Keep logic minimal and deterministic.
//!
//! The accepted grammar, matched against the whole string:
//!
//! ```text
//! url    = scheme "://" host [ ":" 1*DIGIT ] [ rest ]
//! scheme = "http" | "https"                       ; case-insensitive
//! host   = 1*( label "." ) 2*ALPHA [ "." ]
//!        | "localhost"                            ; case-insensitive
//!        | 1*3DIGIT "." 1*3DIGIT "." 1*3DIGIT "." 1*3DIGIT
//! label  = alnum [ *61( alnum | "-" ) alnum ]
//! rest   = "/" | ( "/" | "?" ) 1*non-whitespace
//! ```
//!
//! Octets of a numeric host and the port are not range checked, so
//! `https://999.999.999.999:99999` is accepted.

use crate::CoreError;

const MAX_LABEL_LEN: usize = 63;

/// Return true when `candidate` is a well-formed absolute http(s) URL.
pub fn is_valid_url(candidate: &str) -> bool {
    let Some(after_scheme) = strip_scheme(candidate) else {
        return false;
    };

    // Host characters never include ':', '/' or '?', so the host is the
    // longest run of host characters right after the scheme.
    let host_end = after_scheme
        .find(|c: char| !is_host_char(c))
        .unwrap_or(after_scheme.len());
    let (host, tail) = after_scheme.split_at(host_end);

    if !is_valid_host(host) {
        return false;
    }

    let tail = match tail.strip_prefix(':') {
        Some(port_and_rest) => {
            let digits = port_and_rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(port_and_rest.len());
            if digits == 0 {
                return false;
            }
            &port_and_rest[digits..]
        }
        None => tail,
    };

    is_valid_rest(tail)
}

/// Validate a candidate, returning `CoreError::Validation` when it is rejected.
pub fn validate_candidate(candidate: &str) -> Result<(), CoreError> {
    if is_valid_url(candidate) {
        Ok(())
    } else {
        Err(CoreError::Validation)
    }
}

fn strip_scheme(s: &str) -> Option<&str> {
    ["https://", "http://"].iter().find_map(|scheme| {
        let head = s.get(..scheme.len())?;
        if head.eq_ignore_ascii_case(scheme) {
            Some(&s[scheme.len()..])
        } else {
            None
        }
    })
}

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '.'
}

fn is_valid_host(host: &str) -> bool {
    host.eq_ignore_ascii_case("localhost") || is_dotted_quad(host) || is_domain_name(host)
}

fn is_dotted_quad(host: &str) -> bool {
    let groups: Vec<&str> = host.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| (1..=3).contains(&g.len()) && g.bytes().all(|b| b.is_ascii_digit()))
}

fn is_domain_name(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    let Some((labels, tld)) = host.rsplit_once('.') else {
        return false;
    };
    tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
        && labels.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            bytes.len() <= MAX_LABEL_LEN
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
        }
        _ => false,
    }
}

fn is_valid_rest(rest: &str) -> bool {
    if rest.is_empty() || rest == "/" {
        return true;
    }
    let mut chars = rest.chars();
    match chars.next() {
        Some('/') | Some('?') => {
            let tail = chars.as_str();
            !tail.is_empty() && !tail.chars().any(is_whitespace)
        }
        _ => false,
    }
}

// What browsers treat as `\s`: Unicode white space minus NEL, plus the BOM.
fn is_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com"));
        assert!(is_valid_url("http://localhost:8080/path?q=1"));
        assert!(is_valid_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_url("https://docs.rs/tokio/latest/tokio/"));
        assert!(is_valid_url("http://a-b.c-d.example.org"));
        assert!(is_valid_url("https://example.com/"));
        assert!(is_valid_url("https://example.com?q=1"));
        assert!(is_valid_url("https://example.com//double"));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert!(is_valid_url("HTTPS://EXAMPLE.COM"));
        assert!(is_valid_url("Http://Example.Com/Path"));
        assert!(is_valid_url("http://LOCALHOST"));
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(!is_valid_url("ftp://example.com"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("http:/example.com"));
        assert!(!is_valid_url("mailto:user@example.com"));
    }

    #[test]
    fn numeric_hosts_are_not_range_checked() {
        assert!(is_valid_url("http://127.0.0.1"));
        assert!(is_valid_url("https://999.999.999.999"));
        assert!(is_valid_url("http://10.0.0.1:3000/api"));
        assert!(!is_valid_url("http://1.2.3"));
        assert!(!is_valid_url("http://1.2.3.4.5"));
        assert!(!is_valid_url("http://1234.1.1.1"));
        assert!(!is_valid_url("http://1.2.3.4."));
    }

    #[test]
    fn hostname_rules() {
        // single label hosts other than localhost
        assert!(!is_valid_url("http://intranet"));
        // tld must be letters, at least two
        assert!(!is_valid_url("http://example.c"));
        assert!(!is_valid_url("http://example.c0m"));
        assert!(is_valid_url("http://example.museum"));
        // optional trailing dot
        assert!(is_valid_url("http://example.com."));
        assert!(!is_valid_url("http://example.com.."));
        // hyphen placement
        assert!(!is_valid_url("http://-example.com"));
        assert!(!is_valid_url("http://example-.com"));
        assert!(!is_valid_url("http://exa..mple.com"));
        // label length
        let long = "a".repeat(63);
        assert!(is_valid_url(&format!("http://{long}.com")));
        let too_long = "a".repeat(64);
        assert!(!is_valid_url(&format!("http://{too_long}.com")));
        // no userinfo, no underscores
        assert!(!is_valid_url("http://user@example.com"));
        assert!(!is_valid_url("http://my_host.example.com"));
    }

    #[test]
    fn port_rules() {
        assert!(is_valid_url("http://example.com:1"));
        assert!(is_valid_url("http://example.com:99999/x"));
        assert!(!is_valid_url("http://example.com:"));
        assert!(!is_valid_url("http://example.com:/x"));
        assert!(!is_valid_url("http://example.com:80abc"));
    }

    #[test]
    fn path_and_query_rules() {
        assert!(!is_valid_url("http://example.com?"));
        assert!(!is_valid_url("http://example.com#frag"));
        assert!(is_valid_url("http://example.com/#frag"));
        assert!(!is_valid_url("https://examp le.com"));
        assert!(!is_valid_url("https://example.com/a b"));
        assert!(!is_valid_url("https://example.com/a\tb"));
        assert!(!is_valid_url(" https://example.com"));
        assert!(!is_valid_url("https://example.com/ "));
        assert!(is_valid_url("https://example.com/ünïcode"));
        assert!(!is_valid_url("https://example.com/a\u{a0}b"));
        assert!(!is_valid_url("https://example.com/a\u{feff}b"));
    }

    #[test]
    fn next_line_is_not_whitespace() {
        assert!(is_valid_url("https://example.com/a\u{85}b"));
        assert!(is_valid_url("https://example.com?\u{85}"));
    }

    #[test]
    fn validation_is_repeatable() {
        for input in ["https://example.com", "not a url", "https://999.999.999.999"] {
            assert_eq!(is_valid_url(input), is_valid_url(input));
        }
    }

    #[test]
    fn validate_candidate_maps_to_error() {
        assert!(validate_candidate("https://example.com").is_ok());
        assert!(matches!(
            validate_candidate("ftp://example.com"),
            Err(CoreError::Validation)
        ));
    }
}
