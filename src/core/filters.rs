//! Free-text search, status/category filtering and sorting for list views.

use chrono::{DateTime, NaiveDate, Utc};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use crate::core::model::{Idea, Subscription};

/// Anything that can appear in a filterable, sortable list view.
pub trait ListEntry {
    fn label(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn status_label(&self) -> &'static str;
    fn category(&self) -> Option<&str>;
    fn created_at(&self) -> DateTime<Utc>;
    fn cost(&self) -> Option<f64> {
        None
    }
    fn renewal_date(&self) -> Option<NaiveDate> {
        None
    }
}

impl ListEntry for Subscription {
    fn label(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn cost(&self) -> Option<f64> {
        Some(self.cost)
    }

    fn renewal_date(&self) -> Option<NaiveDate> {
        Some(self.renewal_date)
    }
}

impl ListEntry for Idea {
    fn label(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Sort order for list views. Cost and renewal keys only reorder
/// subscriptions; for ideas they leave the input order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Name,
    CostHigh,
    CostLow,
    Renewal,
}

impl Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortKey::Newest => "newest",
                SortKey::Oldest => "oldest",
                SortKey::Name => "name",
                SortKey::CostHigh => "cost-high",
                SortKey::CostLow => "cost-low",
                SortKey::Renewal => "renewal",
            }
        )
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "name" | "title" => Ok(SortKey::Name),
            "cost-high" => Ok(SortKey::CostHigh),
            "cost-low" => Ok(SortKey::CostLow),
            "renewal" => Ok(SortKey::Renewal),
            _ => Err(anyhow::anyhow!("Invalid sort key: {}", s)),
        }
    }
}

/// List view parameters. `None` filters are pass-through ("all").
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub sort: SortKey,
}

/// Applies search, filters and sort over `items`, returning a new list.
///
/// Search is a case-insensitive substring match on the label and, when
/// present, the description. Sorting is stable, so repeated application with
/// the same query is idempotent.
pub fn filter_and_sort<T: ListEntry + Clone>(items: &[T], query: &ListQuery) -> Vec<T> {
    let needle = query.search.as_deref().unwrap_or("").to_lowercase();

    let mut out: Vec<T> = items
        .iter()
        .filter(|item| {
            let matches_search = needle.is_empty()
                || item.label().to_lowercase().contains(&needle)
                || item
                    .description()
                    .is_some_and(|d| d.to_lowercase().contains(&needle));
            let matches_status = query
                .status
                .as_deref()
                .is_none_or(|status| status == item.status_label());
            let matches_category = query
                .category
                .as_deref()
                .is_none_or(|category| Some(category) == item.category());

            matches_search && matches_status && matches_category
        })
        .cloned()
        .collect();

    match query.sort {
        SortKey::Newest => out.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        SortKey::Oldest => out.sort_by(|a, b| a.created_at().cmp(&b.created_at())),
        SortKey::Name => out.sort_by(|a, b| a.label().cmp(b.label())),
        SortKey::CostHigh => out.sort_by(|a, b| match (a.cost(), b.cost()) {
            (Some(x), Some(y)) => y.total_cmp(&x),
            _ => Ordering::Equal,
        }),
        SortKey::CostLow => out.sort_by(|a, b| match (a.cost(), b.cost()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        }),
        SortKey::Renewal => out.sort_by(|a, b| match (a.renewal_date(), b.renewal_date()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        }),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::core::model::{BillingCycle, IdeaStatus, SubscriptionStatus};

    fn subscription(
        id: &str,
        name: &str,
        description: Option<&str>,
        cost: f64,
        status: SubscriptionStatus,
        category: Option<&str>,
        created_day: u32,
        renewal_day: u32,
    ) -> Subscription {
        let created = Utc.with_ymd_and_hms(2025, 1, created_day, 12, 0, 0).unwrap();
        Subscription {
            id: id.to_string(),
            user_id: "u1".to_string(),
            name: name.to_string(),
            description: description.map(str::to_string),
            cost,
            currency: None,
            billing_cycle: BillingCycle::Monthly,
            renewal_date: NaiveDate::from_ymd_opt(2025, 2, renewal_day).unwrap(),
            category: category.map(str::to_string),
            status,
            website: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn fixtures() -> Vec<Subscription> {
        vec![
            subscription(
                "s1",
                "Netflix",
                Some("Video streaming"),
                649.0,
                SubscriptionStatus::Active,
                Some("Entertainment"),
                1,
                10,
            ),
            subscription(
                "s2",
                "Spotify",
                Some("Music streaming"),
                119.0,
                SubscriptionStatus::Active,
                Some("Entertainment"),
                2,
                5,
            ),
            subscription(
                "s3",
                "Figma",
                None,
                1200.0,
                SubscriptionStatus::Paused,
                Some("Tools"),
                3,
                20,
            ),
        ]
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let subs = fixtures();
        let out = filter_and_sort(&subs, &ListQuery::default());
        assert_eq!(out.len(), subs.len());
        // Default sort is newest first.
        assert_eq!(out[0].id, "s3");
        assert_eq!(out[2].id, "s1");
    }

    #[test]
    fn test_search_is_case_insensitive_and_covers_description() {
        let subs = fixtures();

        let query = ListQuery {
            search: Some("NETFLIX".to_string()),
            ..Default::default()
        };
        let out = filter_and_sort(&subs, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "s1");

        let query = ListQuery {
            search: Some("streaming".to_string()),
            ..Default::default()
        };
        let out = filter_and_sort(&subs, &query);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_status_and_category_filters() {
        let subs = fixtures();

        let query = ListQuery {
            status: Some("paused".to_string()),
            ..Default::default()
        };
        let out = filter_and_sort(&subs, &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "s3");

        let query = ListQuery {
            category: Some("Entertainment".to_string()),
            ..Default::default()
        };
        let out = filter_and_sort(&subs, &query);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_cost_and_renewal_sorts() {
        let subs = fixtures();

        let query = ListQuery {
            sort: SortKey::CostHigh,
            ..Default::default()
        };
        let ids: Vec<String> = filter_and_sort(&subs, &query)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["s3", "s1", "s2"]);

        let query = ListQuery {
            sort: SortKey::CostLow,
            ..Default::default()
        };
        let ids: Vec<String> = filter_and_sort(&subs, &query)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["s2", "s1", "s3"]);

        let query = ListQuery {
            sort: SortKey::Renewal,
            ..Default::default()
        };
        let ids: Vec<String> = filter_and_sort(&subs, &query)
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["s2", "s1", "s3"]);
    }

    #[test]
    fn test_name_sort() {
        let subs = fixtures();
        let query = ListQuery {
            sort: SortKey::Name,
            ..Default::default()
        };
        let names: Vec<String> = filter_and_sort(&subs, &query)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Figma", "Netflix", "Spotify"]);
    }

    #[test]
    fn test_filter_and_sort_is_idempotent() {
        let subs = fixtures();
        let query = ListQuery {
            search: Some("i".to_string()),
            sort: SortKey::CostHigh,
            ..Default::default()
        };

        let once = filter_and_sort(&subs, &query);
        let twice = filter_and_sort(&once, &query);
        let once_ids: Vec<&str> = once.iter().map(|s| s.id.as_str()).collect();
        let twice_ids: Vec<&str> = twice.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn test_cost_sort_on_ideas_keeps_input_order() {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let idea = |id: &str| Idea {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: id.to_string(),
            description: None,
            status: IdeaStatus::Draft,
            category: None,
            tags: Vec::new(),
            created_at: created,
            updated_at: created,
        };
        let ideas = vec![idea("first"), idea("second"), idea("third")];

        let query = ListQuery {
            sort: SortKey::CostHigh,
            ..Default::default()
        };
        let ids: Vec<String> = filter_and_sort(&ideas, &query)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_sort_key_round_trip() {
        for key in [
            SortKey::Newest,
            SortKey::Oldest,
            SortKey::Name,
            SortKey::CostHigh,
            SortKey::CostLow,
            SortKey::Renewal,
        ] {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), key);
        }
        assert_eq!("title".parse::<SortKey>().unwrap(), SortKey::Name);
        assert!("upside-down".parse::<SortKey>().is_err());
    }
}
