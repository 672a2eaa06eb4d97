// Job listings: display shaping, search, and the employer/candidate CRUD around them.
// salary, benefits and search are pure; repository is the only module touching the pool.

pub mod benefits;
pub mod handlers;
pub mod repository;
pub mod salary;
pub mod search;
pub mod validation;
