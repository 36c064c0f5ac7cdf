pub mod app_config;
pub mod config;
pub mod error;
pub mod login;
pub mod model;
pub mod nav;
pub mod session;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, override_api_base_url};
pub use error::{ConfigError, ModelError};
pub use login::{Credentials, FieldError, LoginField, LoginForm};
pub use model::{
    validate_page_size, AgeRange, BreedSelection, Cursor, DogId, DogRecord, FavoriteSet,
    FilterState, MatchResult, PageCursor, PagePosition, SearchPage, SearchQuery, SortOrder,
    ZipFilter, ZipStatus, MAX_DOG_AGE, MAX_PAGE_SIZE,
};
pub use nav::{guard, navigate, Access, View};
pub use session::{Session, SessionStatus};
