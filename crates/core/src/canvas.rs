//! Editing operations on the blocks of a [`Page`].
//!
//! These mirror what the builder does when a user drops, edits, drags or
//! deletes a block. They know nothing about which block types exist; callers
//! check type tags against the registry before placing.

use crate::error::{Error, Result};
use crate::types::{Page, PlacedBlock};
use serde_json::Value;

impl Page {
    /// Append a new block to the end of the page and return its id
    pub fn place(&mut self, type_tag: impl Into<String>, config: Value) -> String {
        let block = PlacedBlock::new(type_tag, config);
        let id = block.id.clone();
        tracing::debug!(id = %id, type_tag = %block.type_tag, "placed block");
        self.blocks.push(block);
        id
    }

    /// Replace the configuration of an existing block
    pub fn update(&mut self, id: &str, config: Value) -> Result<&PlacedBlock> {
        let block = self.block_mut(id)?;
        block.config = config;
        Ok(&*block)
    }

    /// Remove a block, returning it
    pub fn remove(&mut self, id: &str) -> Result<PlacedBlock> {
        let index = self.index_of(id)?;
        Ok(self.blocks.remove(index))
    }

    /// Move a block to `index`, clamped to the end of the page
    pub fn move_block(&mut self, id: &str, index: usize) -> Result<()> {
        let from = self.index_of(id)?;
        let block = self.blocks.remove(from);
        let to = index.min(self.blocks.len());
        self.blocks.insert(to, block);
        Ok(())
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| Error::BlockNotFound(id.to_string()))
    }

    fn block_mut(&mut self, id: &str) -> Result<&mut PlacedBlock> {
        self.blocks
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| Error::BlockNotFound(id.to_string()))
    }
}
