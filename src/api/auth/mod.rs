pub mod handlers;
pub mod structures;

pub use handlers::{__path_login, __path_signup, init_routes, login, signup};

pub use structures::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
