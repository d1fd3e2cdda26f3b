use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// The copyright block printed in the document's colophon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Copyright {
    /// The first year covered by the copyright.
    pub from_year: i32,

    /// The last year covered, when it spans several years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_year: Option<i32>,

    /// Overrides the copyright holder, which otherwise defaults to the
    /// document authors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,

    /// Free text printed below the copyright notice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Whether to print the toolkit attribution. Absent means yes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adpt_notice: Option<bool>,
}

impl Copyright {
    /// A copyright starting in `year`, with everything else unset.
    #[must_use]
    pub const fn since(year: i32) -> Self {
        Self {
            from_year: year,
            to_year: None,
            holder: None,
            text: None,
            adpt_notice: None,
        }
    }

    /// The covered years, as `from` or `from--to`.
    #[must_use]
    pub fn years(&self) -> String {
        match self.to_year {
            Some(to_year) => format!("{}--{to_year}", self.from_year),
            None => self.from_year.to_string(),
        }
    }

    /// Whether the toolkit attribution line should be printed.
    #[must_use]
    pub fn shows_notice(&self) -> bool {
        self.adpt_notice != Some(false)
    }
}

impl Default for Copyright {
    /// A copyright starting in the current year.
    fn default() -> Self {
        Self::since(chrono::Local::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_use_a_double_hyphen_range() {
        assert_eq!(Copyright::since(2020).years(), "2020");

        let span = Copyright {
            to_year: Some(2023),
            ..Copyright::since(2020)
        };
        assert_eq!(span.years(), "2020--2023");
    }

    #[test]
    fn notice_is_shown_unless_disabled() {
        let mut copyright = Copyright::since(2020);
        assert!(copyright.shows_notice());

        copyright.adpt_notice = Some(true);
        assert!(copyright.shows_notice());

        copyright.adpt_notice = Some(false);
        assert!(!copyright.shows_notice());
    }

    #[test]
    fn keys_are_camel_case() {
        let copyright: Copyright =
            serde_yaml::from_str("fromYear: 2019\ntoYear: 2021\nadptNotice: false\n").unwrap();

        assert_eq!(copyright.from_year, 2019);
        assert_eq!(copyright.to_year, Some(2021));
        assert_eq!(copyright.adpt_notice, Some(false));
    }

    #[test]
    fn default_starts_this_year() {
        assert_eq!(
            Copyright::default().from_year,
            chrono::Local::now().year()
        );
    }
}
