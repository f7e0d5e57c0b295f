//! Content configuration derivation.
//!
//! # Purpose
//! Turns a user's specialization names into the UI surface they are allowed
//! to see: layout, features, actions, navigation, hidden sections and
//! per-domain field visibility.
//!
//! # How it fits
//! Each role owns one static [`ContentTable`]. Every specialization-gated
//! output is derived from the same [`FeatureArea`] entries, so an area is
//! either fully visible or fully hidden.
//!
//! # Key invariants
//! - Output is a pure function of (table, specialization names).
//! - List order follows table order; duplicates are dropped, first one wins.
//! - No navigation id of a visible area appears in `hidden_sections`.
//!
//! # Common pitfalls
//! - Sharing a feature or section id between two areas breaks the partition
//!   check; give each area its own ids.
use crate::{ErrorCode, HallMonitorError, HallMonitorResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Dashboard layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardLayout {
    JobcoachTrainer,
    JobcoachSpecialist,
    JobcoachCounselor,
    ClientJobSeeker,
    ClientCareerChanger,
    ClientLearner,
    ClientStandard,
    Minimal,
}

impl DashboardLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            DashboardLayout::JobcoachTrainer => "jobcoach-trainer",
            DashboardLayout::JobcoachSpecialist => "jobcoach-specialist",
            DashboardLayout::JobcoachCounselor => "jobcoach-counselor",
            DashboardLayout::ClientJobSeeker => "client-job-seeker",
            DashboardLayout::ClientCareerChanger => "client-career-changer",
            DashboardLayout::ClientLearner => "client-learner",
            DashboardLayout::ClientStandard => "client-standard",
            DashboardLayout::Minimal => "minimal",
        }
    }
}

impl std::fmt::Display for DashboardLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub id: String,
    pub label: String,
    pub href: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationItem>,
}

impl NavigationItem {
    /// Ids of this item and all of its descendants, depth first.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids = vec![self.id.as_str()];
        for child in &self.children {
            ids.extend(child.ids());
        }
        ids
    }
}

/// Per-domain visibility flags, e.g. `clients -> { showCaseNotes: true }`.
pub type CustomFields = BTreeMap<String, BTreeMap<String, bool>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    pub dashboard_layout: DashboardLayout,
    pub available_features: Vec<String>,
    pub primary_actions: Vec<String>,
    pub secondary_actions: Vec<String>,
    pub navigation_items: Vec<NavigationItem>,
    pub hidden_sections: Vec<String>,
    pub custom_fields: CustomFields,
    pub visible_components: Vec<String>,
    pub permissions: Vec<String>,
}

impl ContentConfig {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.available_features.iter().any(|f| f == feature)
    }
}

/// Static navigation node used in role tables.
#[derive(Debug)]
pub struct NavSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    pub children: &'static [NavSpec],
}

impl NavSpec {
    fn to_item(&self) -> NavigationItem {
        NavigationItem {
            id: self.id.to_string(),
            label: self.label.to_string(),
            href: self.href.to_string(),
            icon: self.icon.to_string(),
            children: self.children.iter().map(NavSpec::to_item).collect(),
        }
    }
}

#[derive(Debug)]
pub struct FieldGroup {
    pub domain: &'static str,
    pub fields: &'static [(&'static str, bool)],
}

/// A specialization-gated slice of the UI.
#[derive(Debug)]
pub struct FeatureArea {
    pub id: &'static str,
    /// Any one of these specializations unlocks the area.
    pub unlocked_by: &'static [&'static str],
    pub features: &'static [&'static str],
    pub components: &'static [&'static str],
    /// Section ids listed in `hidden_sections` while the area is locked.
    pub sections: &'static [&'static str],
    pub primary_actions: &'static [&'static str],
    pub secondary_actions: &'static [&'static str],
    pub navigation: &'static [NavSpec],
    pub fields: &'static [FieldGroup],
}

impl FeatureArea {
    pub fn is_unlocked(&self, specializations: &[String]) -> bool {
        self.unlocked_by
            .iter()
            .any(|wanted| specializations.iter().any(|name| name == wanted))
    }
}

#[derive(Debug)]
pub struct Baseline {
    pub features: &'static [&'static str],
    pub components: &'static [&'static str],
    pub primary_actions: &'static [&'static str],
    pub secondary_actions: &'static [&'static str],
    pub navigation: &'static [NavSpec],
}

/// Everything a role needs to derive a [`ContentConfig`].
#[derive(Debug)]
pub struct ContentTable {
    /// First held specialization in this list picks the layout.
    pub layouts: &'static [(&'static str, DashboardLayout)],
    pub default_layout: DashboardLayout,
    pub baseline: Baseline,
    pub areas: &'static [FeatureArea],
}

impl ContentTable {
    pub fn layout_for(&self, specializations: &[String]) -> DashboardLayout {
        self.layouts
            .iter()
            .find(|(name, _)| specializations.iter().any(|held| held == name))
            .map(|(_, layout)| *layout)
            .unwrap_or(self.default_layout)
    }

    /// Every gated section id, in table order.
    pub fn gated_sections(&self) -> Vec<String> {
        let mut sections = Vec::new();
        for area in self.areas {
            push_all(&mut sections, area.sections);
        }
        sections
    }

    /// Config for a user who holds no specialization in this role.
    pub fn minimal(&self) -> ContentConfig {
        ContentConfig {
            dashboard_layout: DashboardLayout::Minimal,
            available_features: Vec::new(),
            primary_actions: Vec::new(),
            secondary_actions: Vec::new(),
            navigation_items: Vec::new(),
            hidden_sections: self.gated_sections(),
            custom_fields: CustomFields::new(),
            visible_components: Vec::new(),
            permissions: Vec::new(),
        }
    }

    /// Derive the content configuration for a set of specialization names.
    ///
    /// # Errors
    /// - [`ErrorCode::InconsistentConfig`] if the table lets a gated area be
    ///   both visible and hidden (or neither).
    pub fn build(
        &self,
        specializations: &[String],
        permissions: Vec<String>,
    ) -> HallMonitorResult<ContentConfig> {
        if specializations.is_empty() {
            return Ok(self.minimal());
        }

        let base = &self.baseline;
        let mut features = Vec::new();
        let mut components = Vec::new();
        let mut primary_actions = Vec::new();
        let mut secondary_actions = Vec::new();
        let mut navigation: Vec<NavigationItem> =
            base.navigation.iter().map(NavSpec::to_item).collect();
        let mut hidden_sections = Vec::new();
        let mut custom_fields = CustomFields::new();

        push_all(&mut features, base.features);
        push_all(&mut components, base.components);
        push_all(&mut primary_actions, base.primary_actions);
        push_all(&mut secondary_actions, base.secondary_actions);

        for area in self.areas {
            if !area.is_unlocked(specializations) {
                push_all(&mut hidden_sections, area.sections);
                continue;
            }
            push_all(&mut features, area.features);
            push_all(&mut components, area.components);
            push_all(&mut primary_actions, area.primary_actions);
            push_all(&mut secondary_actions, area.secondary_actions);
            navigation.extend(area.navigation.iter().map(NavSpec::to_item));
            for group in area.fields {
                let domain = custom_fields.entry(group.domain.to_string()).or_default();
                for (field, visible) in group.fields {
                    domain.insert(field.to_string(), *visible);
                }
            }
        }

        let config = ContentConfig {
            dashboard_layout: self.layout_for(specializations),
            available_features: features,
            primary_actions,
            secondary_actions,
            navigation_items: navigation,
            hidden_sections,
            custom_fields,
            visible_components: components,
            permissions,
        };
        self.verify_partition(&config)?;
        Ok(config)
    }

    /// Check that every gated area is either fully shown or fully hidden.
    pub fn verify_partition(&self, config: &ContentConfig) -> HallMonitorResult<()> {
        let nav_ids: Vec<&str> = config
            .navigation_items
            .iter()
            .flat_map(NavigationItem::ids)
            .collect();
        for area in self.areas {
            let shown = area.features.iter().all(|f| contains(&config.available_features, f))
                && area
                    .components
                    .iter()
                    .all(|c| contains(&config.visible_components, c))
                && area.sections.iter().all(|s| !contains(&config.hidden_sections, s));
            let hidden = area.features.iter().all(|f| !contains(&config.available_features, f))
                && area
                    .components
                    .iter()
                    .all(|c| !contains(&config.visible_components, c))
                && area.sections.iter().all(|s| contains(&config.hidden_sections, s));
            if shown == hidden {
                return Err(HallMonitorError::new(
                    ErrorCode::InconsistentConfig,
                    format!("feature area {} is not cleanly shown or hidden", area.id),
                ));
            }
        }
        if let Some(id) = nav_ids
            .iter()
            .find(|id| contains(&config.hidden_sections, id))
        {
            return Err(HallMonitorError::new(
                ErrorCode::InconsistentConfig,
                format!("navigation item {id} is listed as hidden"),
            ));
        }
        Ok(())
    }
}

fn contains(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item == value)
}

fn push_all(target: &mut Vec<String>, values: &[&str]) {
    for value in values {
        if !contains(target, value) {
            target.push(value.to_string());
        }
    }
}
