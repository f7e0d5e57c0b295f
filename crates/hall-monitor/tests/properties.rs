mod common;

use common::{DownSource, StaticSource, subsets};
use hall_monitor::{
    Action, ClientHallMonitor, ContentConfig, HallMonitor, HallMonitorConfig, JobCoachHallMonitor,
    Permission, Resource, RoleRules,
};
use std::sync::Arc;

/// Build a monitor where user `u<mask>` holds the `mask`-th subset.
fn monitor_for<R: RoleRules + Default>(role: &str) -> (HallMonitor<R>, Vec<Vec<String>>) {
    let names = R::default().specializations();
    let sets = subsets(names);
    let mut source = StaticSource::new();
    for (idx, set) in sets.iter().enumerate() {
        let refs: Vec<&str> = set.iter().map(String::as_str).collect();
        source = source.with_user(&format!("u{idx}"), role, &refs);
    }
    (
        HallMonitor::new(source.into_arc(), &HallMonitorConfig::default()),
        sets,
    )
}

fn assert_partition<R: RoleRules>(rules: &R, config: &ContentConfig, label: &str) {
    let nav_ids: Vec<String> = config
        .navigation_items
        .iter()
        .flat_map(|item| item.ids().into_iter().map(str::to_string).collect::<Vec<_>>())
        .collect();
    for area in rules.content_table().areas {
        let visible = area
            .features
            .iter()
            .all(|f| config.available_features.iter().any(|x| x == f));
        let hidden = area
            .sections
            .iter()
            .all(|s| config.hidden_sections.iter().any(|x| x == s));
        assert!(visible != hidden, "{label}: area {} visible={visible} hidden={hidden}", area.id);
    }
    for id in &nav_ids {
        assert!(!config.hidden_sections.contains(id), "{label}: nav {id} is hidden");
    }
}

async fn check_role<R: RoleRules + Default>(role: &str) {
    let (monitor, sets) = monitor_for::<R>(role);
    for (idx, set) in sets.iter().enumerate() {
        let user = format!("u{idx}");
        let label = format!("{role} {set:?}");

        let first = monitor.get_content_config(&user).await.expect("config");
        let second = monitor.get_content_config(&user).await.expect("config");
        assert_eq!(
            serde_json::to_string(&first).expect("json"),
            serde_json::to_string(&second).expect("json"),
            "{label}: config not deterministic"
        );

        assert_partition(monitor.rules(), &first, &label);

        assert_eq!(first.permissions, monitor.get_permissions(&user).await);
        for permission in &first.permissions {
            let parsed = Permission::parse(permission).expect("valid permission");
            let result = monitor
                .check_access(&user, parsed.resource.as_str(), parsed.action.as_str(), None)
                .await;
            assert!(
                result.has_access,
                "{label}: {permission} listed but denied: {}",
                result.reason
            );
        }

        if set.is_empty() {
            assert!(first.permissions.is_empty());
            assert!(first.available_features.is_empty());
            for resource in Resource::ALL {
                for action in Action::ALL {
                    let result = monitor
                        .check_access(&user, resource.as_str(), action.as_str(), None)
                        .await;
                    assert!(!result.has_access, "{label}: {resource}:{action} allowed");
                }
            }
        }
    }
}

#[tokio::test]
async fn jobcoach_properties_hold_for_every_specialization_set() {
    check_role::<hall_monitor::JobCoachRules>("jobcoach").await;
}

#[tokio::test]
async fn client_properties_hold_for_every_specialization_set() {
    check_role::<hall_monitor::ClientRules>("client").await;
}

#[tokio::test]
async fn outage_denies_every_pair_for_both_roles() {
    let coach = JobCoachHallMonitor::new(Arc::new(DownSource), &HallMonitorConfig::default());
    let client = ClientHallMonitor::new(Arc::new(DownSource), &HallMonitorConfig::default());
    for resource in Resource::ALL {
        for action in Action::ALL {
            let (resource, action) = (resource.as_str(), action.as_str());
            assert!(!coach.check_access("u1", resource, action, None).await.has_access);
            assert!(!client.check_access("u1", resource, action, None).await.has_access);
        }
    }
    let config = client.get_content_config("u1").await.expect("config");
    assert_partition(&hall_monitor::ClientRules, &config, "client outage");
}
