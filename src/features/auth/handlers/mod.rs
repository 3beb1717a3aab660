pub mod auth_handler;

pub use auth_handler::{
    __path_check_navigation, __path_get_session, __path_login, __path_logout, check_navigation,
    get_session, login, logout,
};
