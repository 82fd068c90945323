//! Authentication module
//! 只负责识别用户身份，鉴权由 policy 完成

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::{extract_token, jwt_auth_middleware, AuthContext};
