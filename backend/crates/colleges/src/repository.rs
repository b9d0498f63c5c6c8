//! Repository trait for the colleges crate

use kernel::id::{CollegeRef, UserRef};

use crate::error::CollegesResult;
use crate::model::{Application, Category, College, CollegeFilter, Page, SavedCollege};

#[trait_variant::make(CollegeRepository: Send)]
pub trait LocalCollegeRepository {
    /// Filtered, paginated catalogue listing.
    async fn list(&self, filter: &CollegeFilter) -> CollegesResult<Page<College>>;

    async fn categories(&self) -> CollegesResult<Vec<Category>>;

    /// Active college by public ref.
    async fn find_by_ref(&self, college_ref: CollegeRef) -> CollegesResult<Option<College>>;

    /// Flip the bookmark for (user, college). Returns the new state:
    /// true when the college is now saved.
    async fn toggle_saved(&self, user_ref: UserRef, college_ref: CollegeRef)
        -> CollegesResult<bool>;

    async fn saved_for_user(&self, user_ref: UserRef) -> CollegesResult<Vec<SavedCollege>>;

    /// Create an application with the fee frozen from the college.
    /// Fails with `DuplicateApplication` if one already exists.
    async fn create_application(
        &self,
        user_ref: UserRef,
        college_ref: CollegeRef,
    ) -> CollegesResult<Application>;

    async fn applications_for_user(&self, user_ref: UserRef) -> CollegesResult<Vec<Application>>;
}
