//! The built-in course policy variants.
//!
//! Variants form a chain around a course-scoped baseline:
//! `PrivateStudentAndFaculty` tightens it, `CourseCollaboration` opens
//! edit/add_child to every reader, and `CoursePublicCollaboration` drops
//! the context precondition for reads only. Aliased actions share the same
//! rule value with their source, so the chain is built from handles, not
//! copies.

use std::sync::Arc;

use coursehub_entity::collaboration::Collaboration;

use super::context::EvalContext;
use super::variant::{PolicyVariant, Rule};

fn faculty_only(obj: &Collaboration, ctx: &EvalContext<'_>) -> bool {
    ctx.context_matches(obj) && ctx.is_faculty()
}

fn faculty_or_owner(obj: &Collaboration, ctx: &EvalContext<'_>) -> bool {
    ctx.context_matches(obj) && (ctx.is_faculty() || ctx.is_owner(obj))
}

fn owner_or_object_group(obj: &Collaboration, ctx: &EvalContext<'_>) -> bool {
    ctx.context_matches(obj) && (ctx.is_owner(obj) || ctx.in_object_group(obj))
}

fn course_member(obj: &Collaboration, ctx: &EvalContext<'_>) -> bool {
    ctx.context_matches(obj) && ctx.is_member()
}

fn allow_any(_obj: &Collaboration, _ctx: &EvalContext<'_>) -> bool {
    true
}

/// Visible only to course faculty, except that the owning student keeps
/// read and add_child access.
pub fn private_student_and_faculty() -> PolicyVariant {
    let manage: Rule = Arc::new(faculty_only);
    let read: Rule = Arc::new(faculty_or_owner);

    PolicyVariant::new(
        Arc::clone(&manage),
        Arc::clone(&manage),
        manage,
        Arc::clone(&read),
        read,
    )
}

/// The course-scoped baseline: writes for the owner or the object's group,
/// reads for every course member.
pub fn course_protected() -> PolicyVariant {
    let manage: Rule = Arc::new(owner_or_object_group);
    let read: Rule = Arc::new(course_member);

    PolicyVariant::new(
        Arc::clone(&manage),
        Arc::clone(&manage),
        Arc::clone(&manage),
        read,
        manage,
    )
}

/// Course-protected, with edit and add_child opened up to every reader.
pub fn course_collaboration() -> PolicyVariant {
    let base = course_protected();
    let read = base.read_rule();

    base.with_edit(Arc::clone(&read)).with_add_child(read)
}

/// Course collaboration whose reads are unconditional, with no context or
/// membership check at all. Edit and add_child keep the member rule they
/// were aliased to before the read override.
pub fn course_public_collaboration() -> PolicyVariant {
    course_collaboration().with_read(Arc::new(allow_any))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::action::PolicyAction;
    use chrono::Utc;
    use coursehub_entity::membership::{CourseRoster, GroupIndex};
    use coursehub_entity::user::User;
    use uuid::Uuid;

    fn user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            password_hash: None,
            is_staff: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn collab(context_id: Uuid, owner_id: Uuid, group_id: Option<Uuid>) -> Collaboration {
        Collaboration {
            id: Uuid::new_v4(),
            context_id,
            owner_id,
            group_id,
            policy: None,
        }
    }

    struct Fixture {
        professor: User,
        student: User,
        outsider: User,
        roster: CourseRoster,
        groups: GroupIndex,
        context: Uuid,
    }

    fn fixture() -> Fixture {
        let professor = user("prof");
        let student = user("student");
        let outsider = user("outsider");
        let roster = CourseRoster::new(
            Uuid::new_v4(),
            vec![professor.clone(), student.clone()],
            vec![professor.clone()],
        );
        Fixture {
            professor,
            student,
            outsider,
            roster,
            groups: GroupIndex::new(),
            context: Uuid::new_v4(),
        }
    }

    impl Fixture {
        fn ctx<'a>(&'a self, user: &'a User) -> EvalContext<'a> {
            EvalContext::new(user, &self.roster, &self.groups, self.context)
        }
    }

    #[test]
    fn test_private_read_allows_faculty_and_owner_only() {
        let f = fixture();
        let v = private_student_and_faculty();
        let obj = collab(f.context, f.student.id, None);

        assert!(v.evaluate(PolicyAction::Read, &obj, &f.ctx(&f.professor)));
        assert!(v.evaluate(PolicyAction::Read, &obj, &f.ctx(&f.student)));
        assert!(!v.evaluate(PolicyAction::Read, &obj, &f.ctx(&f.outsider)));
    }

    #[test]
    fn test_private_manage_is_faculty_only() {
        let f = fixture();
        let v = private_student_and_faculty();
        let obj = collab(f.context, f.student.id, None);

        for action in [PolicyAction::Manage, PolicyAction::Edit, PolicyAction::Delete] {
            assert!(v.evaluate(action, &obj, &f.ctx(&f.professor)));
            assert!(!v.evaluate(action, &obj, &f.ctx(&f.student)));
        }
    }

    #[test]
    fn test_context_mismatch_denies_regardless_of_role() {
        let f = fixture();
        let v = private_student_and_faculty();
        let foreign = collab(Uuid::new_v4(), f.student.id, None);

        assert!(!v.evaluate(PolicyAction::Read, &foreign, &f.ctx(&f.professor)));
        assert!(!v.evaluate(PolicyAction::Manage, &foreign, &f.ctx(&f.professor)));
    }

    #[test]
    fn test_protected_writes_need_ownership_or_object_group() {
        let f = fixture();
        let v = course_protected();

        let group_id = Uuid::new_v4();
        let mut groups = GroupIndex::new();
        groups.insert(group_id, std::collections::HashSet::from([f.student.id]));

        let owned = collab(f.context, f.professor.id, None);
        let grouped = collab(f.context, f.outsider.id, Some(group_id));

        let prof_ctx = EvalContext::new(&f.professor, &f.roster, &groups, f.context);
        let student_ctx = EvalContext::new(&f.student, &f.roster, &groups, f.context);

        assert!(v.evaluate(PolicyAction::Manage, &owned, &prof_ctx));
        assert!(!v.evaluate(PolicyAction::Manage, &owned, &student_ctx));
        assert!(v.evaluate(PolicyAction::Manage, &grouped, &student_ctx));
        assert!(!v.evaluate(PolicyAction::Manage, &grouped, &prof_ctx));
    }

    #[test]
    fn test_protected_read_is_course_membership() {
        let f = fixture();
        let v = course_protected();
        let obj = collab(f.context, f.professor.id, None);

        assert!(v.evaluate(PolicyAction::Read, &obj, &f.ctx(&f.student)));
        assert!(!v.evaluate(PolicyAction::Read, &obj, &f.ctx(&f.outsider)));
    }

    #[test]
    fn test_collaboration_edit_follows_the_read_rule() {
        let f = fixture();
        let v = course_collaboration();
        // Student neither owns the object nor sits in its group, so the
        // manage rule would deny, but edit is aliased to read.
        let obj = collab(f.context, f.professor.id, None);

        assert!(!v.evaluate(PolicyAction::Manage, &obj, &f.ctx(&f.student)));
        assert!(!v.evaluate(PolicyAction::Delete, &obj, &f.ctx(&f.student)));
        assert!(v.evaluate(PolicyAction::Edit, &obj, &f.ctx(&f.student)));
        assert!(v.evaluate(PolicyAction::AddChild, &obj, &f.ctx(&f.student)));
    }

    #[test]
    fn test_public_read_is_unconditional() {
        let f = fixture();
        let v = course_public_collaboration();
        let foreign = collab(Uuid::new_v4(), f.professor.id, None);

        assert!(v.evaluate(PolicyAction::Read, &foreign, &f.ctx(&f.outsider)));
    }

    #[test]
    fn test_public_edit_keeps_the_member_rule() {
        // The read override happens after edit was aliased, so edit still
        // requires context match and course membership.
        let f = fixture();
        let v = course_public_collaboration();
        let obj = collab(f.context, f.professor.id, None);
        let foreign = collab(Uuid::new_v4(), f.professor.id, None);

        assert!(v.evaluate(PolicyAction::Edit, &obj, &f.ctx(&f.student)));
        assert!(!v.evaluate(PolicyAction::Edit, &obj, &f.ctx(&f.outsider)));
        assert!(!v.evaluate(PolicyAction::Edit, &foreign, &f.ctx(&f.student)));
    }

    #[test]
    fn test_staff_flag_grants_faculty_everywhere() {
        let f = fixture();
        let v = private_student_and_faculty();
        let obj = collab(f.context, f.student.id, None);

        let admin = User {
            is_staff: true,
            ..user("root")
        };
        assert!(v.evaluate(PolicyAction::Manage, &obj, &f.ctx(&admin)));
    }
}
