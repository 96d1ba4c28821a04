//! End-to-end policy engine flow: registry resolution, action parsing,
//! and evaluation against a materialized roster.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use coursehub_auth::policy::{EvalContext, PolicyAction, PolicyRegistry};
use coursehub_core::config::policy::PolicyConfig;
use coursehub_core::error::ErrorKind;
use coursehub_entity::collaboration::Collaboration;
use coursehub_entity::membership::{CourseRoster, GroupIndex};
use coursehub_entity::user::User;

fn user(username: &str, first: &str, last: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        password_hash: None,
        is_staff: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

struct CourseWorld {
    professor: User,
    student: User,
    outsider: User,
    roster: CourseRoster,
    groups: GroupIndex,
    context: Uuid,
    registry: PolicyRegistry,
}

fn course_world() -> CourseWorld {
    let professor = user("ghopper", "Grace", "Hopper");
    let student = user("akay", "Alan", "Kay");
    let outsider = user("stranger", "No", "Body");

    let roster = CourseRoster::new(
        Uuid::new_v4(),
        vec![professor.clone(), student.clone()],
        vec![professor.clone()],
    );

    CourseWorld {
        professor,
        student,
        outsider,
        roster,
        groups: GroupIndex::new(),
        context: Uuid::new_v4(),
        registry: PolicyRegistry::with_defaults(&PolicyConfig::default())
            .expect("default registry"),
    }
}

impl CourseWorld {
    fn ctx<'a>(&'a self, user: &'a User) -> EvalContext<'a> {
        EvalContext::new(user, &self.roster, &self.groups, self.context)
    }

    fn object_in_context(&self, owner: &User) -> Collaboration {
        Collaboration {
            id: Uuid::new_v4(),
            context_id: self.context,
            owner_id: owner.id,
            group_id: None,
            policy: None,
        }
    }
}

#[test]
fn private_read_matches_the_faculty_or_owner_contract() {
    let w = course_world();
    let obj = w.object_in_context(&w.student);

    for (caller, expected) in [(&w.professor, true), (&w.student, true), (&w.outsider, false)] {
        let got = w
            .registry
            .evaluate("PrivateStudentAndFaculty", PolicyAction::Read, &obj, &w.ctx(caller))
            .unwrap();
        assert_eq!(got, expected, "caller {}", caller.username);
    }

    // Mismatched context denies regardless of role.
    let foreign = Collaboration {
        context_id: Uuid::new_v4(),
        ..w.object_in_context(&w.student)
    };
    assert!(
        !w.registry
            .evaluate("PrivateStudentAndFaculty", PolicyAction::Read, &foreign, &w.ctx(&w.professor))
            .unwrap()
    );
}

#[test]
fn public_collaboration_read_is_always_allowed() {
    let w = course_world();
    let foreign = Collaboration {
        context_id: Uuid::new_v4(),
        ..w.object_in_context(&w.professor)
    };

    assert!(
        w.registry
            .evaluate("CoursePublicCollaboration", PolicyAction::Read, &foreign, &w.ctx(&w.outsider))
            .unwrap()
    );
}

#[test]
fn object_group_membership_grants_protected_writes() {
    let w = course_world();
    let team = Uuid::new_v4();
    let mut groups = GroupIndex::new();
    groups.insert(team, HashSet::from([w.student.id]));

    let obj = Collaboration {
        group_id: Some(team),
        ..w.object_in_context(&w.professor)
    };
    let ctx = EvalContext::new(&w.student, &w.roster, &groups, w.context);

    assert!(w.registry.evaluate("CourseProtected", PolicyAction::Manage, &obj, &ctx).unwrap());
    assert!(w.registry.evaluate("CourseProtected", PolicyAction::Delete, &obj, &ctx).unwrap());
}

#[test]
fn evaluate_for_uses_the_object_policy_then_the_default() {
    let w = course_world();

    // Object naming a policy: public read applies.
    let named = Collaboration {
        policy: Some("CoursePublicCollaboration".to_string()),
        context_id: Uuid::new_v4(),
        ..w.object_in_context(&w.professor)
    };
    assert!(
        w.registry
            .evaluate_for(PolicyAction::Read, &named, &w.ctx(&w.outsider))
            .unwrap()
    );

    // Unnamed object falls back to CourseProtected: outsider read denied.
    let unnamed = w.object_in_context(&w.professor);
    assert!(
        !w.registry
            .evaluate_for(PolicyAction::Read, &unnamed, &w.ctx(&w.outsider))
            .unwrap()
    );
    assert!(
        w.registry
            .evaluate_for(PolicyAction::Read, &unnamed, &w.ctx(&w.student))
            .unwrap()
    );
}

#[test]
fn lookup_failures_are_distinguishable_from_denials() {
    let w = course_world();
    let obj = w.object_in_context(&w.student);

    let err = w
        .registry
        .evaluate("NoSuchVariant", PolicyAction::Read, &obj, &w.ctx(&w.student))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lookup);

    let err = "annihilate".parse::<PolicyAction>().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lookup);

    // A denial is an Ok(false), never an error.
    let denial = w
        .registry
        .evaluate("CourseProtected", PolicyAction::Read, &obj, &w.ctx(&w.outsider))
        .unwrap();
    assert!(!denial);
}

#[test]
fn actions_parse_from_wire_strings() {
    for (s, action) in [
        ("manage", PolicyAction::Manage),
        ("edit", PolicyAction::Edit),
        ("delete", PolicyAction::Delete),
        ("read", PolicyAction::Read),
        ("add_child", PolicyAction::AddChild),
    ] {
        assert_eq!(s.parse::<PolicyAction>().unwrap(), action);
    }
}
