//! Reconciliation of a discovered hierarchy against Sonatype Lifecycle
//!
//! Walks the hierarchy depth-first, one awaited call at a time: each
//! organization is resolved before its applications, and its applications
//! before its sub-organizations. A node that already exists is reused;
//! otherwise it is created through [`retry_create`].

use log::{debug, info, warn};

use super::cache::EntityCache;
use super::context::RunContext;
use super::retry::{
    CreateOutcome, candidate_suffixes, is_application_collision, is_organization_collision,
    retry_create,
};
use super::summary::{ImportRecord, ImportSummary, Resolution, ScanOutcome, ScmOutcome};
use crate::client::{
    Application, CreateApplicationRequest, CreateOrganizationRequest, LifecycleApi, Organization,
    OwnerType, SourceControl, SourceControlEvaluationRequest,
};
use crate::error::{Error, ImportError, Result};
use crate::hierarchy::{self, HierarchyRoot};
use crate::scm::ScmConfiguration;

/// A server entity and whether this run created it
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub entity: T,
    pub resolution: Resolution,
}

impl<T> Resolved<T> {
    fn created(entity: T) -> Self {
        Self {
            entity,
            resolution: Resolution::Created,
        }
    }

    fn reused(entity: T) -> Self {
        Self {
            entity,
            resolution: Resolution::Reused,
        }
    }
}

/// Look up the organization everything is imported under.
pub async fn find_target_organization<A: LifecycleApi + ?Sized>(
    api: &A,
    name: &str,
) -> Result<Organization> {
    let mut matches = api.find_organizations_by_name(name).await?;
    match matches.len() {
        0 => Err(ImportError::TargetNotFound(name.to_string()).into()),
        1 => Ok(matches.remove(0)),
        count => Err(ImportError::TargetAmbiguous {
            name: name.to_string(),
            count,
        }
        .into()),
    }
}

fn creation_error(kind: OwnerType, name: &str, attempts: usize, cause: Error) -> Error {
    ImportError::CreateFailed {
        kind,
        name: name.to_string(),
        attempts,
        source: Box::new(cause),
    }
    .into()
}

pub struct Reconciler<'a, A: LifecycleApi + ?Sized> {
    api: &'a A,
    cache: &'a mut EntityCache,
    ctx: &'a RunContext,
    summary: ImportSummary,
}

impl<'a, A: LifecycleApi + ?Sized> Reconciler<'a, A> {
    pub fn new(api: &'a A, cache: &'a mut EntityCache, ctx: &'a RunContext) -> Self {
        Self {
            api,
            cache,
            ctx,
            summary: ImportSummary::new(),
        }
    }

    /// Import every top-level organization of `root` under `target`.
    ///
    /// Stops at the first node that cannot be created or configured.
    pub async fn apply(
        mut self,
        root: &HierarchyRoot,
        target: &Organization,
        scm: &ScmConfiguration,
    ) -> Result<ImportSummary> {
        self.cache.initialize(self.api).await?;

        for org in &root.organizations {
            self.import_top_level(org, &target.id, scm).await?;
        }

        Ok(self.summary)
    }

    /// Find or create the organization `name` under `parent_id`.
    pub async fn resolve_organization(
        &mut self,
        name: &str,
        parent_id: &str,
    ) -> Result<Resolved<Organization>> {
        let safe_name = self.ctx.sanitizer.safe_name(name);

        // A previous run may have created this organization under a bumped name.
        let cache = &*self.cache;
        let existing = candidate_suffixes(self.ctx.max_create_attempts).find_map(|suffix| {
            cache.organization_exists(&format!("{}{}", safe_name, suffix), parent_id)
        });
        if let Some(existing) = existing {
            info!(
                "Organization '{}' already exists with ID {}",
                existing.name, existing.id
            );
            return Ok(Resolved::reused(existing.clone()));
        }

        info!("Creating Organization '{}' under {}", safe_name, parent_id);
        let api = self.api;
        let outcome = retry_create(
            &safe_name,
            self.ctx.max_create_attempts,
            is_organization_collision,
            |suffix| {
                api.create_organization(CreateOrganizationRequest {
                    name: format!("{}{}", safe_name, suffix),
                    parent_organization_id: parent_id.to_string(),
                })
            },
        )
        .await;

        match outcome {
            CreateOutcome::Success { value, attempts } => {
                debug!(
                    "Created Organization '{}' ({}) after {} attempt(s)",
                    value.name, value.id, attempts
                );
                self.cache.push_organization(value.clone());
                Ok(Resolved::created(value))
            }
            CreateOutcome::CollisionExhausted {
                attempts,
                last_candidate,
            } => Err(ImportError::CollisionExhausted {
                kind: OwnerType::Organization,
                candidate: last_candidate,
                attempts,
            }
            .into()),
            CreateOutcome::FatalError { attempts, cause } => Err(creation_error(
                OwnerType::Organization,
                &safe_name,
                attempts,
                cause,
            )),
        }
    }

    /// Find or create `app` inside `organization_id`.
    pub async fn resolve_application(
        &mut self,
        app: &hierarchy::Application,
        organization_id: &str,
    ) -> Result<Resolved<Application>> {
        let safe_name = app.safe_name(&self.ctx.sanitizer);
        let safe_id = app.safe_id(&self.ctx.sanitizer);

        let cache = &*self.cache;
        let existing = candidate_suffixes(self.ctx.max_create_attempts).find_map(|suffix| {
            cache.application_exists(
                &format!("{}{}", safe_name, suffix),
                &format!("{}{}", safe_id, suffix),
                organization_id,
            )
        });
        if let Some(existing) = existing {
            info!(
                "Application '{}' already exists with ID {}",
                existing.name, existing.id
            );
            return Ok(Resolved::reused(existing.clone()));
        }

        info!(
            "Creating Application '{}' ({}) in {}",
            safe_name, safe_id, organization_id
        );
        let api = self.api;
        let outcome = retry_create(
            &safe_id,
            self.ctx.max_create_attempts,
            is_application_collision,
            |suffix| {
                api.create_application(CreateApplicationRequest {
                    public_id: format!("{}{}", safe_id, suffix),
                    name: format!("{}{}", safe_name, suffix),
                    organization_id: organization_id.to_string(),
                })
            },
        )
        .await;

        match outcome {
            CreateOutcome::Success { value, attempts } => {
                debug!(
                    "Created Application '{}' ({}) after {} attempt(s)",
                    value.name, value.id, attempts
                );
                self.cache.push_application(value.clone());
                Ok(Resolved::created(value))
            }
            CreateOutcome::CollisionExhausted {
                attempts,
                last_candidate,
            } => Err(ImportError::CollisionExhausted {
                kind: OwnerType::Application,
                candidate: last_candidate,
                attempts,
            }
            .into()),
            CreateOutcome::FatalError { attempts, cause } => Err(creation_error(
                OwnerType::Application,
                &safe_id,
                attempts,
                cause,
            )),
        }
    }

    async fn import_top_level(
        &mut self,
        org: &hierarchy::Organization,
        root_id: &str,
        scm: &ScmConfiguration,
    ) -> Result<()> {
        let resolved = self.resolve_organization(&org.name, root_id).await?;
        let id = resolved.entity.id.clone();
        let config = scm.organization_source_control();

        let scm_outcome = match resolved.resolution {
            Resolution::Created => {
                self.api
                    .add_source_control(OwnerType::Organization, &id, &config)
                    .await?;
                ScmOutcome::Configured
            }
            Resolution::Reused if self.ctx.refresh_existing_scm => {
                self.api
                    .update_source_control(OwnerType::Organization, &id, &config)
                    .await?;
                ScmOutcome::Updated
            }
            Resolution::Reused => ScmOutcome::None,
        };

        self.record_organization(&org.name, resolved, scm_outcome);

        for app in &org.applications {
            self.import_application(app, &id).await?;
        }
        for sub in &org.sub_organizations {
            self.import_sub_organization(sub, &id).await?;
        }
        Ok(())
    }

    async fn import_sub_organization(
        &mut self,
        org: &hierarchy::Organization,
        parent_id: &str,
    ) -> Result<()> {
        let resolved = self.resolve_organization(&org.name, parent_id).await?;
        let id = resolved.entity.id.clone();
        self.record_organization(&org.name, resolved, ScmOutcome::None);

        for app in &org.applications {
            self.import_application(app, &id).await?;
        }
        for sub in &org.sub_organizations {
            Box::pin(self.import_sub_organization(sub, &id)).await?;
        }
        Ok(())
    }

    async fn import_application(
        &mut self,
        app: &hierarchy::Application,
        organization_id: &str,
    ) -> Result<()> {
        let resolved = self.resolve_application(app, organization_id).await?;
        let id = resolved.entity.id.clone();

        let (scm, scan) = match app.permitted_branch() {
            None => {
                warn!(
                    "Not configuring source control for Application '{}': branch {:?} or repository URL '{}' is not permitted",
                    app.name, app.default_branch, app.repository_url
                );
                (ScmOutcome::Skipped, ScanOutcome::NotRequested)
            }
            Some(branch) => {
                let config = SourceControl::for_repository(&app.repository_url, branch);
                match resolved.resolution {
                    Resolution::Created => {
                        self.api
                            .add_source_control(OwnerType::Application, &id, &config)
                            .await?;
                        let scan = self.trigger_evaluation(&id, branch).await;
                        (ScmOutcome::Configured, scan)
                    }
                    Resolution::Reused => {
                        self.api
                            .update_source_control(OwnerType::Application, &id, &config)
                            .await?;
                        (ScmOutcome::Updated, ScanOutcome::NotRequested)
                    }
                }
            }
        };

        self.summary.record(ImportRecord {
            kind: OwnerType::Application,
            source_name: app.name.clone(),
            target_name: resolved.entity.name,
            target_id: id,
            resolution: resolved.resolution,
            scm,
            scan,
        });
        Ok(())
    }

    /// Best effort: a failed trigger is logged and reported, never returned.
    async fn trigger_evaluation(&self, application_id: &str, branch: &str) -> ScanOutcome {
        let request = SourceControlEvaluationRequest {
            branch_name: branch.to_string(),
            stage_id: self.ctx.evaluation_stage.clone(),
        };

        match self.api.evaluate_source_control(application_id, request).await {
            Ok(()) => {
                info!(
                    "Requested {} evaluation of branch '{}' for Application {}",
                    self.ctx.evaluation_stage, branch, application_id
                );
                ScanOutcome::Triggered
            }
            Err(e) => {
                warn!(
                    "Failed to request evaluation for Application {}: {}",
                    application_id, e
                );
                ScanOutcome::Failed
            }
        }
    }

    fn record_organization(
        &mut self,
        source_name: &str,
        resolved: Resolved<Organization>,
        scm: ScmOutcome,
    ) {
        self.summary.record(ImportRecord {
            kind: OwnerType::Organization,
            source_name: source_name.to_string(),
            target_name: resolved.entity.name,
            target_id: resolved.entity.id,
            resolution: resolved.resolution,
            scm,
            scan: ScanOutcome::NotRequested,
        });
    }
}
