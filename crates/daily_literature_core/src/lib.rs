pub mod catalog;
pub mod domain;
pub mod error;
pub mod favorites;
pub mod identity;
pub mod memory;
pub mod ports;
pub mod requests;
pub mod search;
pub mod selector;
pub mod session;
pub mod share;

pub use catalog::{available_eras, complete_favorite, generate_catalog};
pub use domain::{
    AuthorInfo, FavoriteRecord, FavoriteSort, FavoritesDocument, Keyword, Quote, QuoteRequest, RequestForm,
    RequestStatus, SessionIdentity, SortMode, WorkInfo, ALL_ERAS,
};
pub use error::{LiteratureError, LiteratureResult, ValidationErrors};
pub use favorites::{FavoritesState, FavoritesStore};
pub use identity::identity_of;
pub use memory::MemoryDocumentStore;
pub use ports::{ArrayOp, DocumentStore, IdentityProvider, NewDocument, PortError, PortResult};
pub use requests::RequestSubmitter;
pub use search::{filter_favorites, search};
pub use selector::{quote_of_the_day, quote_of_today, random_quote};
pub use session::SessionContext;
pub use share::share_text;
