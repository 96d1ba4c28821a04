//! The provisioning pipeline.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::{debug, info};

use coursehub_auth::password;
use coursehub_core::config::provisioning::ProvisioningConfig;
use coursehub_core::error::{AppError, ErrorKind};
use coursehub_core::result::AppResult;
use coursehub_database::repositories::{GroupRepository, UserRepository};
use coursehub_entity::group::Group;

use super::parser;
use super::resolver::{CourseStringResolver, ResolvedGroups};

/// Where a provisioning batch lands.
#[derive(Debug, Clone)]
pub enum ProvisionTarget {
    /// Explicitly selected groups.
    Groups {
        /// The primary group.
        group: Group,
        /// The faculty group, when the course has one.
        faculty_group: Option<Group>,
    },
    /// An opaque course string, resolved by the configured
    /// [`CourseStringResolver`].
    CourseString(String),
}

/// Outcome counts for one provisioning batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Accounts newly created.
    pub users_created: usize,
    /// Credentials written (new or overwritten).
    pub passwords_set: usize,
    /// Primary-group memberships newly added.
    pub members_added: usize,
    /// Faculty-group memberships newly added.
    pub faculty_added: usize,
    /// Faculty markers dropped because the target has no faculty group.
    pub faculty_markers_dropped: usize,
    /// Non-blank lines that parsed to nothing.
    pub lines_skipped: usize,
}

/// Creates or reuses accounts from a bulk-add text block and assigns
/// group memberships.
///
/// Group resolution happens once per batch, before any mutation; the
/// per-line mutations share one transaction, so a mid-batch storage
/// failure rolls the whole batch back.
#[derive(Clone)]
pub struct ProvisioningService {
    /// Pool the batch transaction is opened on.
    pool: PgPool,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Group repository.
    group_repo: Arc<GroupRepository>,
    /// Course-string resolver, when one is configured.
    resolver: Option<Arc<dyn CourseStringResolver>>,
    /// Pipeline settings.
    config: ProvisioningConfig,
}

impl ProvisioningService {
    /// Create a new provisioning service.
    pub fn new(
        pool: PgPool,
        user_repo: Arc<UserRepository>,
        group_repo: Arc<GroupRepository>,
        resolver: Option<Arc<dyn CourseStringResolver>>,
        config: ProvisioningConfig,
    ) -> Self {
        Self {
            pool,
            user_repo,
            group_repo,
            resolver,
            config,
        }
    }

    /// Run one provisioning batch.
    ///
    /// Re-running the same batch is idempotent at the membership level;
    /// supplied passwords overwrite the stored credential on every run.
    pub async fn provision(
        &self,
        target: ProvisionTarget,
        input: &str,
    ) -> AppResult<ProvisionReport> {
        let line_count = input.lines().count();
        if line_count > self.config.max_batch_lines {
            return Err(AppError::validation(format!(
                "Batch has {line_count} lines; at most {} are accepted",
                self.config.max_batch_lines
            )));
        }

        let resolved = self.resolve_target(target).await?;
        let entries = parser::parse_batch(input);

        let mut report = ProvisionReport {
            lines_skipped: input.lines().filter(|l| !l.trim().is_empty()).count() - entries.len(),
            ..ProvisionReport::default()
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        for entry in &entries {
            let (user, created) = self.user_repo.get_or_create(&mut tx, &entry.username).await?;
            if created {
                report.users_created += 1;
            }

            if let Some(plaintext) = &entry.password {
                let hash = password::hash_password(plaintext)?;
                self.user_repo.set_password(&mut tx, user.id, &hash).await?;
                report.passwords_set += 1;
            }

            if self
                .group_repo
                .add_member(&mut tx, resolved.group.id, user.id)
                .await?
            {
                report.members_added += 1;
            }

            if entry.faculty {
                match &resolved.faculty_group {
                    Some(faculty_group) => {
                        if self
                            .group_repo
                            .add_member(&mut tx, faculty_group.id, user.id)
                            .await?
                        {
                            report.faculty_added += 1;
                        }
                    }
                    None => {
                        debug!(
                            username = %entry.username,
                            "Faculty marker dropped: target has no faculty group"
                        );
                        report.faculty_markers_dropped += 1;
                    }
                }
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit provisioning batch", e)
        })?;

        info!(
            group = %resolved.group.name,
            users_created = report.users_created,
            members_added = report.members_added,
            faculty_added = report.faculty_added,
            "Provisioning batch committed"
        );

        Ok(report)
    }

    /// Resolve the batch target to its group pair.
    ///
    /// Course strings need a configured resolver; without one they are a
    /// validation failure, reported before any mutation.
    async fn resolve_target(&self, target: ProvisionTarget) -> AppResult<ResolvedGroups> {
        match target {
            ProvisionTarget::Groups {
                group,
                faculty_group,
            } => Ok(ResolvedGroups {
                group,
                faculty_group,
            }),
            ProvisionTarget::CourseString(course_string) => match &self.resolver {
                Some(resolver) => resolver.resolve(&course_string).await,
                None => Err(AppError::validation(
                    "No course-string resolver is configured; select a target group explicitly",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use coursehub_core::error::ErrorKind;

    fn service(resolver: Option<Arc<dyn CourseStringResolver>>) -> ProvisioningService {
        // connect_lazy never touches the network; these tests only cover
        // the paths that fail before the batch transaction opens.
        let pool = PgPool::connect_lazy("postgres://localhost/coursehub_test")
            .expect("lazy pool");
        ProvisioningService::new(
            pool.clone(),
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(GroupRepository::new(pool)),
            resolver,
            ProvisioningConfig {
                max_batch_lines: 4,
            },
        )
    }

    struct FailingResolver;

    #[async_trait]
    impl CourseStringResolver for FailingResolver {
        async fn resolve(&self, course_string: &str) -> AppResult<ResolvedGroups> {
            Err(AppError::validation(format!(
                "Unknown course string: '{course_string}'"
            )))
        }
    }

    #[tokio::test]
    async fn test_oversized_batch_is_rejected_before_resolution() {
        let svc = service(None);
        let err = svc
            .provision(
                ProvisionTarget::CourseString("t1.y2024.s001.cA1234.ARTH".to_string()),
                "a\nb\nc\nd\ne",
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_course_string_without_resolver_is_a_validation_failure() {
        let svc = service(None);
        let err = svc
            .provision(
                ProvisionTarget::CourseString("t1.y2024.s001.cA1234.ARTH".to_string()),
                "alice",
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_resolver_failure_halts_the_batch() {
        let svc = service(Some(Arc::new(FailingResolver)));
        let err = svc
            .provision(
                ProvisionTarget::CourseString("bogus".to_string()),
                "alice:secret",
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("bogus"));
    }
}
