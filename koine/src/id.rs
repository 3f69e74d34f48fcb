// SPDX-License-Identifier: Apache-2.0

/// A record whose identity is assigned by whoever persists it.
pub trait HasId {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: Option<String>);
}
