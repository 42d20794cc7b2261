use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One (source tag, target tag) compatibility verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRule {
    #[serde(rename = "sourceTag")]
    pub source_tag: String,
    #[serde(rename = "targetTag")]
    pub target_tag: String,
    #[serde(default = "default_true")]
    pub compatible: bool,
}

fn default_true() -> bool {
    true
}

/// Directional tag rule set between two categories. Lookup treats the
/// category pair as symmetric; the tag roles follow the stored
/// direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "sourceCategoryId")]
    pub source_category_id: String,
    #[serde(rename = "targetCategoryId")]
    pub target_category_id: String,
    #[serde(default)]
    pub rules: Vec<TagRule>,
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompatibilityRuleDto {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "sourceCategoryId")]
    pub source_category_id: String,
    #[serde(rename = "targetCategoryId")]
    pub target_category_id: String,
    #[serde(default)]
    pub rules: Vec<TagRule>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
}

impl CompatibilityRule {
    pub fn new_for_insert(dto: &CompatibilityRuleDto) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: dto.name.trim().to_string(),
            description: dto.description.clone(),
            source_category_id: dto.source_category_id.clone(),
            target_category_id: dto.target_category_id.clone(),
            rules: normalize_rules(dto.rules.clone()),
            is_active: dto.is_active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, dto: &CompatibilityRuleDto) {
        self.name = dto.name.trim().to_string();
        if dto.description.is_some() {
            self.description = dto.description.clone();
        }
        self.source_category_id = dto.source_category_id.clone();
        self.target_category_id = dto.target_category_id.clone();
        self.rules = normalize_rules(dto.rules.clone());
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Rule name is required".into());
        }
        if self.source_category_id.is_empty() || self.target_category_id.is_empty() {
            return Err("Source and target categories are required".into());
        }
        for rule in &self.rules {
            if rule.source_tag.is_empty() || rule.target_tag.is_empty() {
                return Err("Tag rule tags cannot be empty".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Does this rule cover the given category pair in its stored
    /// direction?
    pub fn covers(&self, source_category: &str, target_category: &str) -> bool {
        self.source_category_id == source_category && self.target_category_id == target_category
    }

    /// First tuple matching any (source tag, target tag) combination
    /// decides, in list order.
    pub fn first_match(&self, source_tags: &[String], target_tags: &[String]) -> Option<bool> {
        self.rules
            .iter()
            .find(|rule| {
                source_tags.iter().any(|t| t == &rule.source_tag)
                    && target_tags.iter().any(|t| t == &rule.target_tag)
            })
            .map(|rule| rule.compatible)
    }
}

fn normalize_rules(rules: Vec<TagRule>) -> Vec<TagRule> {
    rules
        .into_iter()
        .map(|rule| TagRule {
            source_tag: rule.source_tag.trim().to_lowercase(),
            target_tag: rule.target_tag.trim().to_lowercase(),
            compatible: rule.compatible,
        })
        .collect()
}

/// Evaluate the tag rules for a component pair. `forward` rules are
/// authored (category A -> category B), `reverse` rules the other way;
/// both sets are expected in creation order. The first matching tuple
/// wins; absence of any match means compatible.
pub fn resolve_tag_rules(
    forward: &[&CompatibilityRule],
    reverse: &[&CompatibilityRule],
    tags_a: &[String],
    tags_b: &[String],
) -> bool {
    for rule in forward {
        if let Some(verdict) = rule.first_match(tags_a, tags_b) {
            return verdict;
        }
    }
    for rule in reverse {
        if let Some(verdict) = rule.first_match(tags_b, tags_a) {
            return verdict;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(source: &str, target: &str, tuples: Vec<(&str, &str, bool)>) -> CompatibilityRule {
        CompatibilityRule::new_for_insert(&CompatibilityRuleDto {
            name: format!("{source}-{target}"),
            source_category_id: source.to_string(),
            target_category_id: target.to_string(),
            rules: tuples
                .into_iter()
                .map(|(s, t, c)| TagRule {
                    source_tag: s.to_string(),
                    target_tag: t.to_string(),
                    compatible: c,
                })
                .collect(),
            ..Default::default()
        })
    }

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn explicit_false_is_hard_incompatibility() {
        let r = rule("cpu", "motherboard", vec![("am4", "lga1700", false)]);
        let verdict = resolve_tag_rules(&[&r], &[], &tags(&["am4"]), &tags(&["lga1700"]));
        assert!(!verdict);
    }

    #[test]
    fn no_rule_defaults_to_compatible() {
        assert!(resolve_tag_rules(&[], &[], &tags(&["am4"]), &tags(&["atx"])));
    }

    #[test]
    fn no_matching_tuple_defaults_to_compatible() {
        let r = rule("cpu", "motherboard", vec![("am4", "am4", true)]);
        assert!(resolve_tag_rules(
            &[&r],
            &[],
            &tags(&["lga1700"]),
            &tags(&["z690"])
        ));
    }

    #[test]
    fn first_matching_tuple_wins() {
        let r = rule(
            "cpu",
            "motherboard",
            vec![("am4", "b550", false), ("am4", "b550", true)],
        );
        let verdict = resolve_tag_rules(&[&r], &[], &tags(&["am4"]), &tags(&["b550"]));
        assert!(!verdict);
    }

    #[test]
    fn reverse_rule_swaps_tag_roles() {
        // Rule authored motherboard -> cpu, queried as (cpu, motherboard).
        let r = rule("motherboard", "cpu", vec![("b550", "lga1700", false)]);
        let verdict = resolve_tag_rules(&[], &[&r], &tags(&["lga1700"]), &tags(&["b550"]));
        assert!(!verdict);
    }

    #[test]
    fn tags_normalized_on_write() {
        let r = rule("cpu", "mb", vec![(" AM4 ", "B550", true)]);
        assert_eq!(r.rules[0].source_tag, "am4");
        assert_eq!(r.rules[0].target_tag, "b550");
    }
}
