//! Shared newtype wrappers.
//!
//! These types prevent the "bag of primitives" failure mode: a `ProductId`
//! cannot be passed where an `OrderId` is expected, a `Price` carries its
//! display convention with it, and `Email`/`Cpf` are validated once at the
//! boundary and trusted afterwards.

mod cpf;
mod email;
mod id;
mod price;

pub use cpf::{Cpf, CpfError};
pub use email::{Email, EmailError};
pub use id::{ActivityLogId, CartItemId, OrderId, ProductId};
pub use price::Price;
