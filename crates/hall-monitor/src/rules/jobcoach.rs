//! Job coach rule table.
use super::{RoleRules, gate, open, requires};
use crate::content::{Baseline, ContentTable, DashboardLayout, FeatureArea, FieldGroup, NavSpec};
use crate::{AccessResult, Action, Resource, RoleKind, RuleRequest};
use serde_json::json;

pub const CAREER_COUNSELOR: &str = "Career Counselor";
pub const EMPLOYMENT_SPECIALIST: &str = "Employment Specialist";
pub const SKILLS_TRAINER: &str = "Skills Trainer";

const CASELOAD: &[&str] = &[CAREER_COUNSELOR, EMPLOYMENT_SPECIALIST];

#[derive(Debug, Clone, Copy, Default)]
pub struct JobCoachRules;

impl RoleRules for JobCoachRules {
    fn role(&self) -> RoleKind {
        RoleKind::JobCoach
    }

    fn specializations(&self) -> &'static [&'static str] {
        &[SKILLS_TRAINER, EMPLOYMENT_SPECIALIST, CAREER_COUNSELOR]
    }

    fn evaluate(&self, resource: Resource, request: &RuleRequest<'_>) -> AccessResult {
        match resource {
            Resource::Profile => profile(request),
            Resource::Clients => clients(request),
            Resource::Sessions => sessions(request),
            Resource::Content => authored(Resource::Content, request, &[
                Action::Create,
                Action::Update,
                Action::Delete,
            ]),
            Resource::Training => authored(Resource::Training, request, &[
                Action::Create,
                Action::Update,
                Action::Manage,
            ]),
            Resource::Resources => authored(Resource::Resources, request, &[
                Action::Create,
                Action::Update,
            ]),
            Resource::Analytics => analytics(request),
            Resource::Dashboard | Resource::Notifications => match request.action {
                Action::Read | Action::Update => open(RoleKind::JobCoach, resource, request.action),
                other => AccessResult::unknown_action(resource.as_str(), other.as_str()),
            },
            Resource::Messages => match request.action {
                Action::Read | Action::Send => open(RoleKind::JobCoach, resource, request.action),
                other => AccessResult::unknown_action(resource.as_str(), other.as_str()),
            },
            Resource::Applications | Resource::Courses => {
                AccessResult::unknown_resource(resource.as_str())
            }
        }
    }

    fn content_table(&self) -> &'static ContentTable {
        &CONTENT
    }
}

fn profile(request: &RuleRequest<'_>) -> AccessResult {
    match request.action {
        Action::Read | Action::Update if request.targets_other_user() => AccessResult::deny(
            format!("Job coaches can only {} their own profile", request.action),
        ),
        Action::Read | Action::Update => AccessResult::allow(format!(
            "Job coaches can {} their own profile",
            request.action
        )),
        other => AccessResult::unknown_action("profile", other.as_str()),
    }
}

fn clients(request: &RuleRequest<'_>) -> AccessResult {
    match request.action {
        Action::Read | Action::Update => gate(Resource::Clients, request, CASELOAD),
        Action::Create | Action::Delete => {
            if !request.has_any(CASELOAD) {
                return requires(Resource::Clients, request.action, CASELOAD);
            }
            gate(Resource::Clients, request, &[EMPLOYMENT_SPECIALIST])
        }
        other => AccessResult::unknown_action("clients", other.as_str()),
    }
}

fn sessions(request: &RuleRequest<'_>) -> AccessResult {
    match request.action {
        Action::Read => open(RoleKind::JobCoach, Resource::Sessions, Action::Read),
        Action::Schedule | Action::Update | Action::Cancel => {
            gate(Resource::Sessions, request, CASELOAD)
        }
        other => AccessResult::unknown_action("sessions", other.as_str()),
    }
}

/// Read for everyone, listed mutations for Skills Trainers only.
fn authored(resource: Resource, request: &RuleRequest<'_>, mutations: &[Action]) -> AccessResult {
    match request.action {
        Action::Read => open(RoleKind::JobCoach, resource, Action::Read),
        action if mutations.contains(&action) => gate(resource, request, &[SKILLS_TRAINER]),
        other => AccessResult::unknown_action(resource.as_str(), other.as_str()),
    }
}

fn analytics(request: &RuleRequest<'_>) -> AccessResult {
    match request.action {
        Action::Read if request.has(EMPLOYMENT_SPECIALIST) => {
            AccessResult::allow("Employment Specialist has full analytics access")
        }
        Action::Read => AccessResult::allow("Job coaches have limited analytics access")
            .with_context(json!({ "scope": "limited" })),
        Action::Export | Action::Manage => {
            gate(Resource::Analytics, request, &[EMPLOYMENT_SPECIALIST])
        }
        other => AccessResult::unknown_action("analytics", other.as_str()),
    }
}

static CONTENT: ContentTable = ContentTable {
    layouts: &[
        (SKILLS_TRAINER, DashboardLayout::JobcoachTrainer),
        (EMPLOYMENT_SPECIALIST, DashboardLayout::JobcoachSpecialist),
    ],
    default_layout: DashboardLayout::JobcoachCounselor,
    baseline: Baseline {
        features: &["dashboard", "messaging", "notifications", "profile", "resource-library"],
        components: &["WelcomeBanner", "MessageCenter", "NotificationFeed", "ResourceLibrary"],
        primary_actions: &["view-schedule", "send-message"],
        secondary_actions: &["update-profile", "browse-resources"],
        navigation: &[
            NavSpec {
                id: "dashboard",
                label: "Dashboard",
                href: "/jobcoach/dashboard",
                icon: "home",
                children: &[],
            },
            NavSpec {
                id: "messages",
                label: "Messages",
                href: "/jobcoach/messages",
                icon: "message-circle",
                children: &[],
            },
            NavSpec {
                id: "resources",
                label: "Resources",
                href: "/jobcoach/resources",
                icon: "book-open",
                children: &[],
            },
            NavSpec {
                id: "profile",
                label: "Profile",
                href: "/jobcoach/profile",
                icon: "user",
                children: &[],
            },
        ],
    },
    areas: &[
        FeatureArea {
            id: "client-management",
            unlocked_by: CASELOAD,
            features: &["client-management", "client-notes", "session-scheduling"],
            components: &["ClientRoster", "CaseNotesPanel", "SessionCalendar"],
            sections: &["client-management", "session-scheduling"],
            primary_actions: &["view-clients", "schedule-session"],
            secondary_actions: &["add-case-note"],
            navigation: &[
                NavSpec {
                    id: "client-management",
                    label: "Clients",
                    href: "/jobcoach/clients",
                    icon: "users",
                    children: &[
                        NavSpec {
                            id: "client-roster",
                            label: "Roster",
                            href: "/jobcoach/clients",
                            icon: "list",
                            children: &[],
                        },
                        NavSpec {
                            id: "client-notes",
                            label: "Case Notes",
                            href: "/jobcoach/clients/notes",
                            icon: "file-text",
                            children: &[],
                        },
                    ],
                },
                NavSpec {
                    id: "session-scheduling",
                    label: "Sessions",
                    href: "/jobcoach/sessions",
                    icon: "calendar",
                    children: &[],
                },
            ],
            fields: &[FieldGroup {
                domain: "clients",
                fields: &[("showContactInfo", true), ("showCaseNotes", true)],
            }],
        },
        FeatureArea {
            id: "career-counseling",
            unlocked_by: &[CAREER_COUNSELOR],
            features: &["career-assessments", "counseling-sessions"],
            components: &["AssessmentLibrary", "CounselingPlanner"],
            sections: &["career-counseling"],
            primary_actions: &["start-assessment"],
            secondary_actions: &["review-assessment-results"],
            navigation: &[NavSpec {
                id: "career-counseling",
                label: "Counseling",
                href: "/jobcoach/counseling",
                icon: "compass",
                children: &[],
            }],
            fields: &[FieldGroup {
                domain: "assessments",
                fields: &[("showScores", true), ("showRecommendations", true)],
            }],
        },
        FeatureArea {
            id: "job-placement",
            unlocked_by: &[EMPLOYMENT_SPECIALIST],
            features: &["job-placement", "employer-network"],
            components: &["PlacementBoard", "EmployerDirectory"],
            sections: &["job-placement", "employer-network"],
            primary_actions: &["add-client", "record-placement"],
            secondary_actions: &["contact-employer"],
            navigation: &[NavSpec {
                id: "job-placement",
                label: "Placements",
                href: "/jobcoach/placements",
                icon: "briefcase",
                children: &[NavSpec {
                    id: "employer-network",
                    label: "Employers",
                    href: "/jobcoach/placements/employers",
                    icon: "building",
                    children: &[],
                }],
            }],
            fields: &[FieldGroup {
                domain: "clients",
                fields: &[("showEmploymentHistory", true)],
            }],
        },
        FeatureArea {
            id: "advanced-analytics",
            unlocked_by: &[EMPLOYMENT_SPECIALIST],
            features: &["advanced-analytics", "analytics-export"],
            components: &["OutcomeCharts", "AnalyticsExport"],
            sections: &["advanced-analytics"],
            primary_actions: &[],
            secondary_actions: &["export-report"],
            navigation: &[NavSpec {
                id: "advanced-analytics",
                label: "Analytics",
                href: "/jobcoach/analytics",
                icon: "bar-chart",
                children: &[],
            }],
            fields: &[FieldGroup {
                domain: "analytics",
                fields: &[("showOutcomeMetrics", true), ("showPlacementRates", true)],
            }],
        },
        FeatureArea {
            id: "training-management",
            unlocked_by: &[SKILLS_TRAINER],
            features: &["training-management", "content-authoring", "course-builder"],
            components: &["TrainingModules", "ContentEditor"],
            sections: &["training-management", "content-authoring"],
            primary_actions: &["create-training", "publish-content"],
            secondary_actions: &["review-progress"],
            navigation: &[NavSpec {
                id: "training-management",
                label: "Training",
                href: "/jobcoach/training",
                icon: "graduation-cap",
                children: &[
                    NavSpec {
                        id: "training-modules",
                        label: "Modules",
                        href: "/jobcoach/training/modules",
                        icon: "layers",
                        children: &[],
                    },
                    NavSpec {
                        id: "content-authoring",
                        label: "Content",
                        href: "/jobcoach/training/content",
                        icon: "edit",
                        children: &[],
                    },
                ],
            }],
            fields: &[FieldGroup {
                domain: "training",
                fields: &[("showCompletionRates", true), ("showDraftContent", true)],
            }],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessContext, UserId};

    fn check(names: &[&str], resource: Resource, action: Action) -> AccessResult {
        let user = UserId::parse("coach-1").expect("user");
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        JobCoachRules.evaluate(resource, &RuleRequest {
            user_id: &user,
            specializations: &names,
            action,
            context: None,
        })
    }

    #[test]
    fn clients_create_is_stricter_than_read() {
        assert!(check(&[CAREER_COUNSELOR], Resource::Clients, Action::Read).has_access);
        let denied = check(&[CAREER_COUNSELOR], Resource::Clients, Action::Create);
        assert!(!denied.has_access);
        assert!(denied.reason.contains(EMPLOYMENT_SPECIALIST));
        assert!(check(&[EMPLOYMENT_SPECIALIST], Resource::Clients, Action::Create).has_access);
        assert!(!check(&[SKILLS_TRAINER], Resource::Clients, Action::Read).has_access);
    }

    #[test]
    fn content_mutations_need_skills_trainer() {
        assert!(check(&[CAREER_COUNSELOR], Resource::Content, Action::Read).has_access);
        assert!(!check(&[CAREER_COUNSELOR], Resource::Content, Action::Delete).has_access);
        assert!(check(&[SKILLS_TRAINER], Resource::Content, Action::Delete).has_access);
        assert!(check(&[SKILLS_TRAINER], Resource::Training, Action::Manage).has_access);
    }

    #[test]
    fn analytics_read_scope_depends_on_specialization() {
        let full = check(&[EMPLOYMENT_SPECIALIST], Resource::Analytics, Action::Read);
        assert!(full.has_access);
        assert_eq!(full.context, None);

        let limited = check(&[CAREER_COUNSELOR], Resource::Analytics, Action::Read);
        assert!(limited.has_access);
        assert_eq!(limited.context, Some(json!({"scope": "limited"})));

        assert!(!check(&[CAREER_COUNSELOR], Resource::Analytics, Action::Export).has_access);
    }

    #[test]
    fn coarse_resources_are_open() {
        for resource in [Resource::Dashboard, Resource::Messages] {
            let result = check(&[SKILLS_TRAINER], resource, Action::Read);
            assert!(result.has_access, "{resource}: {}", result.reason);
        }
        assert!(check(&[SKILLS_TRAINER], Resource::Messages, Action::Send).has_access);
    }

    #[test]
    fn unknown_actions_and_foreign_resources() {
        let result = check(&[SKILLS_TRAINER], Resource::Dashboard, Action::Delete);
        assert_eq!(result.reason, "Unknown dashboard action: delete");

        let result = check(&[SKILLS_TRAINER], Resource::Courses, Action::Read);
        assert_eq!(result.reason, "Unknown resource: courses");
    }

    #[test]
    fn profile_is_limited_to_self() {
        let user = UserId::parse("coach-1").expect("user");
        let names = vec![SKILLS_TRAINER.to_string()];
        let other = AccessContext::for_target_user("coach-2");
        let result = JobCoachRules.evaluate(Resource::Profile, &RuleRequest {
            user_id: &user,
            specializations: &names,
            action: Action::Update,
            context: Some(&other),
        });
        assert!(!result.has_access);
        assert!(check(&[SKILLS_TRAINER], Resource::Profile, Action::Update).has_access);
    }

    #[test]
    fn permissions_follow_rules() {
        let user = UserId::parse("coach-1").expect("user");
        let perms: Vec<String> = JobCoachRules
            .permissions_for(&user, &[CAREER_COUNSELOR.to_string()])
            .iter()
            .map(|p| p.as_string())
            .collect();
        assert!(perms.contains(&"clients:read".to_string()));
        assert!(perms.contains(&"analytics:read".to_string()));
        assert!(!perms.contains(&"clients:create".to_string()));
        assert!(!perms.contains(&"content:create".to_string()));
        assert_eq!(perms[0], "profile:read");
    }
}
