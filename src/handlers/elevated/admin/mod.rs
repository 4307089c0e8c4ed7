// handlers/elevated/admin/mod.rs - User management and reporting

pub mod scores; // GET /api/v1/user-chapters/summary/all-scores
pub mod summary; // GET /api/v1/users/summary/{students,admins}
pub mod users; // POST /users/admin, GET /users/mahasiswa, DELETE /users/:id

pub use scores::all_scores_get;
pub use summary::{admin_summary_get, student_summary_get};
pub use users::{admin_post, students_get, user_delete};
