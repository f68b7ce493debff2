//! Shareable rivalry links: `rivalry?teamA=<team>&teamB=<team>`.

use std::borrow::Cow;

pub const ROUTE: &str = "rivalry";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RivalryLink {
    pub team_a: String,
    pub team_b: String,
}

impl RivalryLink {
    pub fn new(team_a: impl Into<String>, team_b: impl Into<String>) -> Self {
        Self { team_a: team_a.into(), team_b: team_b.into() }
    }

    pub fn to_query(&self) -> String {
        format!(
            "{ROUTE}?teamA={}&teamB={}",
            urlencoding::encode(&self.team_a),
            urlencoding::encode(&self.team_b)
        )
    }

    /// Accepts a bare query, the route form, or a full URL. Both teams are required.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let query = raw.split_once('?').map_or(raw, |(_, q)| q);
        let query = query.split('#').next().unwrap_or_default();

        let (mut team_a, mut team_b) = (None, None);
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            let value = decode(value)?;
            if value.trim().is_empty() {
                continue;
            }
            match key {
                "teamA" => team_a = Some(value.trim().to_owned()),
                "teamB" => team_b = Some(value.trim().to_owned()),
                _ => {}
            }
        }
        Some(Self { team_a: team_a?, team_b: team_b? })
    }
}

fn decode(value: &str) -> Option<String> {
    let spaced: Cow<str> = if value.contains('+') {
        Cow::Owned(value.replace('+', " "))
    } else {
        Cow::Borrowed(value)
    };
    urlencoding::decode(&spaced).ok().map(Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_round_trips_names_with_spaces_and_punctuation() {
        let link = RivalryLink::new("St. Louis Rams", "Chi/Pit Cards/Steelers");
        let query = link.to_query();
        assert_eq!(
            query,
            "rivalry?teamA=St.%20Louis%20Rams&teamB=Chi%2FPit%20Cards%2FSteelers"
        );
        assert_eq!(RivalryLink::parse(&query), Some(link));
    }

    #[test]
    fn parses_full_urls_in_any_order() {
        let link = RivalryLink::parse(
            "https://rivals.example.com/rivalry?teamB=Chicago+Bears&teamA=Green%20Bay%20Packers#top",
        );
        assert_eq!(link, Some(RivalryLink::new("Green Bay Packers", "Chicago Bears")));
    }

    #[test]
    fn both_teams_are_required() {
        assert_eq!(RivalryLink::parse("rivalry?teamA=Detroit%20Lions"), None);
        assert_eq!(RivalryLink::parse("teamA=&teamB=Chicago%20Bears"), None);
        assert_eq!(RivalryLink::parse(""), None);
    }
}
