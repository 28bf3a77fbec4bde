//! The parking board: a store plus the view the user is looking at

use crate::config::StoreConfig;
use crate::editor::{normalize, EditMode, SpotForm};
use crate::error::Result;
use crate::filter::{StatusCounts, ViewState};
use crate::persistence::SpotPersistence;
use crate::spot::Spot;
use crate::status::StatusFilter;
use crate::store::SpotStore;

/// Something the user asked the board to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Add a spot from the creation form
    Create {
        /// Submitted form
        form: SpotForm,
    },

    /// Save the edit form of an existing spot
    Edit {
        /// Id of the spot the form was opened on
        original_id: String,
        /// Submitted form
        form: SpotForm,
    },

    /// Release a spot
    Free {
        /// Spot id
        id: String,
    },

    /// Delete a spot
    Delete {
        /// Spot id
        id: String,
    },

    /// Change the status filter
    SetStatusFilter(StatusFilter),

    /// Change the search text
    SetSearchQuery(String),
}

/// A spot store with the filter and search applied to it.
#[derive(Debug)]
pub struct Board<P> {
    store: SpotStore<P>,
    view: ViewState,
}

impl<P: SpotPersistence> Board<P> {
    /// Open a board on `persistence`, showing every spot.
    pub fn open(persistence: P, config: StoreConfig) -> Result<Self> {
        Ok(Self::new(SpotStore::open(persistence, config)?))
    }

    /// Wrap an already opened store.
    pub fn new(store: SpotStore<P>) -> Self {
        Self {
            store,
            view: ViewState::new(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &SpotStore<P> {
        &self.store
    }

    /// Current filter and search text.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Spots passing the current filter and search, in store order.
    pub fn visible(&self) -> Vec<&Spot> {
        self.view.apply(self.store.list())
    }

    /// Status totals over the whole store.
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(self.store.list())
    }

    /// Form pre-filled for editing spot `id`.
    pub fn edit_form(&self, id: &str) -> Option<SpotForm> {
        self.store.get(id).map(SpotForm::from_spot)
    }

    /// Carry out `intent`.
    ///
    /// Rejected forms and unknown ids leave the board unchanged.
    pub fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Create { form } => {
                let spot = normalize(&form, &EditMode::Create, &self.store)?;
                self.store.create(spot)
            }
            Intent::Edit { original_id, form } => {
                let mode = EditMode::edit(original_id.as_str());
                let spot = normalize(&form, &mode, &self.store)?;
                self.store.update(&original_id, spot)
            }
            Intent::Free { id } => self.store.free(&id),
            Intent::Delete { id } => self.store.remove(&id).map(|_| ()),
            Intent::SetStatusFilter(filter) => {
                self.view.set_status_filter(filter);
                Ok(())
            }
            Intent::SetSearchQuery(query) => {
                self.view.set_search_query(query);
                Ok(())
            }
        }
    }
}
