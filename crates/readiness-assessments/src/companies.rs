use std::sync::Arc;

use readiness_core::document::Document;
use readiness_core::fields::company as field;
use readiness_core::keys;
use readiness_core::models::company::Company;
use readiness_storage::{DocumentStore, FieldPath, Update, UpdateOutcome};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::{DeleteMode, ServiceConfig};
use crate::documents;
use crate::error::AssessmentError;

#[derive(Debug, Clone, Deserialize)]
pub struct NewCompany {
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update; `None` leaves a field as stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyChanges {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
}

/// Companies owning assessments. Deletion follows the same soft/hard mode
/// as assessments and never cascades.
pub struct CompanyService<S> {
    store: Arc<S>,
    config: ServiceConfig,
}

impl<S> Clone for CompanyService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

fn validate_name(name: &str) -> Result<String, AssessmentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AssessmentError::InvalidInput {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

impl<S: DocumentStore> CompanyService<S> {
    pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    pub async fn create_company(&self, new: NewCompany) -> Result<Company, AssessmentError> {
        let mut company = Company::new(validate_name(&new.name)?);
        company.industry = new.industry;
        company.description = new.description;

        self.store
            .insert_one(&company.key(), company.to_document()?)
            .await?;
        tracing::info!(company_id = %company.id, "company created");
        Ok(company)
    }

    pub async fn get_company(&self, company_id: Uuid) -> Result<Company, AssessmentError> {
        self.store
            .find_one(&keys::company(company_id))
            .await?
            .map(Company::from_document)
            .transpose()?
            .filter(|c| c.is_active)
            .ok_or_else(|| AssessmentError::company_not_found(company_id))
    }

    /// Active companies sorted by name.
    pub async fn list_companies(&self) -> Result<Vec<Company>, AssessmentError> {
        let documents = self.store.list(keys::COMPANIES_PREFIX).await?;
        let mut companies = Vec::new();
        for (_, raw) in documents {
            let company = Company::from_document(raw)?;
            if company.is_active {
                companies.push(company);
            }
        }
        companies.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(companies)
    }

    pub async fn update_company(
        &self,
        company_id: Uuid,
        changes: CompanyChanges,
    ) -> Result<Company, AssessmentError> {
        let mut update = Update::new()
            .when(documents::active(field::IS_ACTIVE))
            .set_serialized(FieldPath::field(field::UPDATED_AT), &jiff::Timestamp::now())?;
        if let Some(name) = changes.name {
            update = update.set_serialized(FieldPath::field(field::NAME), &validate_name(&name)?)?;
        }
        if let Some(industry) = changes.industry {
            update = update.set_serialized(FieldPath::field(field::INDUSTRY), &industry)?;
        }
        if let Some(description) = changes.description {
            update = update.set_serialized(FieldPath::field(field::DESCRIPTION), &description)?;
        }

        let outcome = self
            .store
            .update_one(&keys::company(company_id), &update)
            .await?;
        match outcome {
            UpdateOutcome::Updated(doc) => Ok(Company::from_document(doc)?),
            UpdateOutcome::Missing | UpdateOutcome::FilterRejected(_) => {
                Err(AssessmentError::company_not_found(company_id))
            }
        }
    }

    /// Returns `false` when there is no active company with this id.
    pub async fn delete_company(&self, company_id: Uuid) -> Result<bool, AssessmentError> {
        let key = keys::company(company_id);
        let deleted = match self.config.delete_policy.mode {
            DeleteMode::Hard => match self.get_company(company_id).await {
                Ok(_) => self.store.delete_one(&key).await?,
                Err(AssessmentError::NotFound { .. }) => false,
                Err(e) => return Err(e),
            },
            DeleteMode::Soft => {
                let now = jiff::Timestamp::now();
                let update = Update::new()
                    .when(documents::active(field::IS_ACTIVE))
                    .set_serialized(FieldPath::field(field::IS_ACTIVE), &false)?
                    .set_serialized(FieldPath::field(field::DELETED_AT), &now)?
                    .set_serialized(FieldPath::field(field::UPDATED_AT), &now)?;
                matches!(
                    self.store.update_one(&key, &update).await?,
                    UpdateOutcome::Updated(_)
                )
            }
        };

        if deleted {
            tracing::info!(%company_id, "company deleted");
        }
        Ok(deleted)
    }
}
