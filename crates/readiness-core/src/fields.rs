/// Top-level field names of persisted assessment documents.
///
/// These must match the serde names on [`crate::models::assessment::Assessment`];
/// they are used to build path updates against the document store.
pub mod assessment {
    pub const NAME: &str = "name";
    pub const COMPANY_ID: &str = "companyId";
    pub const STATUS: &str = "status";
    pub const CURRENT_CATEGORY: &str = "currentCategory";
    pub const CURRENT_STEP: &str = "currentStep";
    pub const RESPONSES: &str = "responses";
    pub const RESPONSE_TIMESTAMPS: &str = "responseTimestamps";
    pub const CATEGORY_STATUSES: &str = "categoryStatuses";
    pub const ALL_CATEGORIES_COMPLETE: &str = "allCategoriesComplete";
    pub const IS_ACTIVE: &str = "isActive";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const COMPLETED_AT: &str = "completedAt";
    pub const DELETED_AT: &str = "deletedAt";
}

/// Top-level field names of persisted company documents.
pub mod company {
    pub const NAME: &str = "name";
    pub const INDUSTRY: &str = "industry";
    pub const DESCRIPTION: &str = "description";
    pub const IS_ACTIVE: &str = "isActive";
    pub const UPDATED_AT: &str = "updatedAt";
    pub const DELETED_AT: &str = "deletedAt";
}
