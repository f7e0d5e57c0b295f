//! Client rule table.
use super::{RoleRules, gate, open};
use crate::content::{Baseline, ContentTable, DashboardLayout, FeatureArea, FieldGroup, NavSpec};
use crate::{AccessResult, Action, Resource, RoleKind, RuleRequest};

pub const JOB_SEEKER: &str = "Job Seeker";
pub const SKILL_BUILDER: &str = "Skill Builder";
pub const CAREER_CHANGER: &str = "Career Changer";

const BOOKING: &[&str] = &[JOB_SEEKER, CAREER_CHANGER];
const LEARNING: &[&str] = &[SKILL_BUILDER, CAREER_CHANGER];

#[derive(Debug, Clone, Copy, Default)]
pub struct ClientRules;

impl RoleRules for ClientRules {
    fn role(&self) -> RoleKind {
        RoleKind::Client
    }

    fn specializations(&self) -> &'static [&'static str] {
        &[JOB_SEEKER, CAREER_CHANGER, SKILL_BUILDER]
    }

    fn evaluate(&self, resource: Resource, request: &RuleRequest<'_>) -> AccessResult {
        match resource {
            Resource::Profile => profile(request),
            Resource::Sessions => sessions(request),
            Resource::Applications => match request.action {
                Action::Read | Action::Create | Action::Update | Action::Delete => {
                    gate(Resource::Applications, request, &[JOB_SEEKER])
                }
                other => AccessResult::unknown_action("applications", other.as_str()),
            },
            Resource::Courses => match request.action {
                Action::Read | Action::Enroll => gate(Resource::Courses, request, LEARNING),
                other => AccessResult::unknown_action("courses", other.as_str()),
            },
            Resource::Resources => match request.action {
                Action::Read => open(RoleKind::Client, resource, Action::Read),
                other => AccessResult::unknown_action("resources", other.as_str()),
            },
            Resource::Dashboard | Resource::Notifications => match request.action {
                Action::Read | Action::Update => open(RoleKind::Client, resource, request.action),
                other => AccessResult::unknown_action(resource.as_str(), other.as_str()),
            },
            Resource::Messages => match request.action {
                Action::Read | Action::Send => open(RoleKind::Client, resource, request.action),
                other => AccessResult::unknown_action("messages", other.as_str()),
            },
            Resource::Clients | Resource::Content | Resource::Training | Resource::Analytics => {
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
            format!("Clients can only {} their own profile", request.action),
        ),
        Action::Read | Action::Update => {
            AccessResult::allow(format!("Clients can {} their own profile", request.action))
        }
        other => AccessResult::unknown_action("profile", other.as_str()),
    }
}

fn sessions(request: &RuleRequest<'_>) -> AccessResult {
    match request.action {
        Action::Read if request.targets_other_client() => {
            AccessResult::deny("Clients can only view their own sessions")
        }
        Action::Read => open(RoleKind::Client, Resource::Sessions, Action::Read),
        Action::Book | Action::Schedule | Action::Cancel => {
            gate(Resource::Sessions, request, BOOKING)
        }
        other => AccessResult::unknown_action("sessions", other.as_str()),
    }
}

static CONTENT: ContentTable = ContentTable {
    layouts: &[
        (JOB_SEEKER, DashboardLayout::ClientJobSeeker),
        (CAREER_CHANGER, DashboardLayout::ClientCareerChanger),
        (SKILL_BUILDER, DashboardLayout::ClientLearner),
    ],
    default_layout: DashboardLayout::ClientStandard,
    baseline: Baseline {
        features: &["dashboard", "messaging", "notifications", "profile", "resource-library"],
        components: &["WelcomeBanner", "ProgressSummary", "MessageCenter", "ResourceLibrary"],
        primary_actions: &["view-progress"],
        secondary_actions: &["update-profile", "contact-coach"],
        navigation: &[
            NavSpec {
                id: "dashboard",
                label: "Dashboard",
                href: "/client/dashboard",
                icon: "home",
                children: &[],
            },
            NavSpec {
                id: "messages",
                label: "Messages",
                href: "/client/messages",
                icon: "message-circle",
                children: &[],
            },
            NavSpec {
                id: "resources",
                label: "Resources",
                href: "/client/resources",
                icon: "book-open",
                children: &[],
            },
            NavSpec {
                id: "profile",
                label: "Profile",
                href: "/client/profile",
                icon: "user",
                children: &[],
            },
        ],
    },
    areas: &[
        FeatureArea {
            id: "job-search",
            unlocked_by: &[JOB_SEEKER],
            features: &["job-search", "application-tracking", "resume-builder"],
            components: &["JobBoard", "ApplicationTracker", "ResumeBuilder"],
            sections: &["job-search", "applications"],
            primary_actions: &["search-jobs", "track-applications"],
            secondary_actions: &["update-resume"],
            navigation: &[NavSpec {
                id: "job-search",
                label: "Jobs",
                href: "/client/jobs",
                icon: "briefcase",
                children: &[
                    NavSpec {
                        id: "job-listings",
                        label: "Search",
                        href: "/client/jobs/search",
                        icon: "search",
                        children: &[],
                    },
                    NavSpec {
                        id: "applications",
                        label: "Applications",
                        href: "/client/jobs/applications",
                        icon: "clipboard",
                        children: &[],
                    },
                ],
            }],
            fields: &[FieldGroup {
                domain: "applications",
                fields: &[("showStatus", true), ("showEmployerNotes", false)],
            }],
        },
        FeatureArea {
            id: "session-booking",
            unlocked_by: BOOKING,
            features: &["session-booking"],
            components: &["SessionBooking"],
            sections: &["session-booking"],
            primary_actions: &["book-session"],
            secondary_actions: &[],
            navigation: &[NavSpec {
                id: "session-booking",
                label: "Sessions",
                href: "/client/sessions",
                icon: "calendar",
                children: &[],
            }],
            fields: &[],
        },
        FeatureArea {
            id: "learning",
            unlocked_by: LEARNING,
            features: &["course-catalog", "skill-assessments", "learning-progress"],
            components: &["CourseCatalog", "SkillAssessment"],
            sections: &["courses", "skill-assessments"],
            primary_actions: &["browse-courses"],
            secondary_actions: &["take-assessment"],
            navigation: &[NavSpec {
                id: "courses",
                label: "Learning",
                href: "/client/courses",
                icon: "graduation-cap",
                children: &[NavSpec {
                    id: "skill-assessments",
                    label: "Assessments",
                    href: "/client/courses/assessments",
                    icon: "check-square",
                    children: &[],
                }],
            }],
            fields: &[FieldGroup {
                domain: "courses",
                fields: &[("showProgress", true), ("showCertificates", true)],
            }],
        },
        FeatureArea {
            id: "career-exploration",
            unlocked_by: &[CAREER_CHANGER],
            features: &["career-exploration", "transferable-skills"],
            components: &["CareerPathExplorer", "TransferableSkillsMap"],
            sections: &["career-exploration"],
            primary_actions: &["explore-careers"],
            secondary_actions: &["map-transferable-skills"],
            navigation: &[NavSpec {
                id: "career-exploration",
                label: "Career Paths",
                href: "/client/career-paths",
                icon: "compass",
                children: &[],
            }],
            fields: &[FieldGroup {
                domain: "profile",
                fields: &[("showPreviousIndustry", true)],
            }],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessContext, UserId};

    fn check_with(
        names: &[&str],
        resource: Resource,
        action: Action,
        context: Option<&AccessContext>,
    ) -> AccessResult {
        let user = UserId::parse("client-1").expect("user");
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        ClientRules.evaluate(resource, &RuleRequest {
            user_id: &user,
            specializations: &names,
            action,
            context,
        })
    }

    fn check(names: &[&str], resource: Resource, action: Action) -> AccessResult {
        check_with(names, resource, action, None)
    }

    #[test]
    fn applications_need_job_seeker() {
        assert!(check(&[JOB_SEEKER], Resource::Applications, Action::Create).has_access);
        let denied = check(&[SKILL_BUILDER], Resource::Applications, Action::Read);
        assert!(!denied.has_access);
        assert_eq!(denied.reason, "applications read requires Job Seeker specialization");
    }

    #[test]
    fn courses_and_booking_use_any_of() {
        assert!(check(&[SKILL_BUILDER], Resource::Courses, Action::Enroll).has_access);
        assert!(check(&[CAREER_CHANGER], Resource::Courses, Action::Read).has_access);
        assert!(!check(&[JOB_SEEKER], Resource::Courses, Action::Enroll).has_access);

        assert!(check(&[CAREER_CHANGER], Resource::Sessions, Action::Book).has_access);
        assert!(!check(&[SKILL_BUILDER], Resource::Sessions, Action::Book).has_access);
        assert!(check(&[SKILL_BUILDER], Resource::Sessions, Action::Read).has_access);
    }

    #[test]
    fn sessions_read_is_scoped_to_own_client_id() {
        let other = AccessContext::for_client("client-2");
        let own = AccessContext::for_client("client-1");
        let read = |ctx: &AccessContext| {
            check_with(&[JOB_SEEKER], Resource::Sessions, Action::Read, Some(ctx))
        };
        assert!(!read(&other).has_access);
        assert!(read(&own).has_access);
    }

    #[test]
    fn staff_resources_are_unknown_to_clients() {
        let staff = [
            Resource::Clients,
            Resource::Content,
            Resource::Training,
            Resource::Analytics,
        ];
        for resource in staff {
            let result = check(&[JOB_SEEKER], resource, Action::Read);
            assert!(!result.has_access);
            assert_eq!(result.reason, format!("Unknown resource: {resource}"));
        }
    }

    #[test]
    fn unknown_action_on_known_resource() {
        let result = check(&[SKILL_BUILDER], Resource::Courses, Action::Delete);
        assert_eq!(result.reason, "Unknown courses action: delete");
    }

    #[test]
    fn layout_precedence() {
        let table = ClientRules.content_table();
        let names = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();
        assert_eq!(
            table.layout_for(&names(&[SKILL_BUILDER, JOB_SEEKER])),
            DashboardLayout::ClientJobSeeker
        );
        assert_eq!(
            table.layout_for(&names(&[SKILL_BUILDER])),
            DashboardLayout::ClientLearner
        );
        assert_eq!(table.layout_for(&names(&["Mentor"])), DashboardLayout::ClientStandard);
    }
}
