//! 门户 URL 构建

use url::Url;

use crate::config::{LISTING_PATH, LOGIN_PATH};
use crate::error::TransportError;
use crate::models::Grade;

fn parse(raw: String) -> Result<Url, TransportError> {
    Url::parse(&raw).map_err(|source| TransportError::InvalidUrl { url: raw, source })
}

/// `https://{host}/ajax.php`
pub fn login_url(host: &str) -> Result<Url, TransportError> {
    parse(format!("https://{}{}", host, LOGIN_PATH))
}

/// `https://{host}/portfolio.php?db=..&t_grade=..&page=..&t_year=..`
pub fn listing_url(
    host: &str,
    category_code: &str,
    grade: Grade,
    page: usize,
    year: i32,
) -> Result<Url, TransportError> {
    let mut url = parse(format!("https://{}{}", host, LISTING_PATH))?;
    url.query_pairs_mut()
        .append_pair("db", category_code)
        .append_pair("t_grade", &grade.number().to_string())
        .append_pair("page", &page.to_string())
        .append_pair("t_year", &year.to_string());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url() {
        let url = listing_url("school.riroschool.kr", "1551", Grade::Second, 3, 2024).unwrap();
        assert_eq!(
            url.as_str(),
            "https://school.riroschool.kr/portfolio.php?db=1551&t_grade=2&page=3&t_year=2024"
        );
    }

    #[test]
    fn test_login_url() {
        let url = login_url("school.riroschool.kr").unwrap();
        assert_eq!(url.as_str(), "https://school.riroschool.kr/ajax.php");
        assert!(login_url("bad host").is_err());
    }
}
