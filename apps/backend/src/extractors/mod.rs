pub mod identity;
pub mod object_id;
pub mod validated_json;

pub use identity::{Identity, MaybeIdentity};
pub use object_id::{ProductId, UserId};
pub use validated_json::ValidatedJson;
