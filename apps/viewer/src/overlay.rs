use crate::error::ClientError;
use crate::models::CollectionDetail;

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayView {
    Closed,
    /// Placeholder shown until the detail fetch resolves.
    Loading { id: i64 },
    Loaded(Box<CollectionDetail>),
    Failed { id: i64, message: String },
}

/// User input the overlay reacts to. Key names follow DOM `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    CloseButton,
    /// Click on the dimmed area around the panel.
    BackdropClick,
    /// Click anywhere inside the panel content.
    PanelClick,
    Key(String),
}

/// Identifies one detail fetch; resolving with an outdated ticket is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    pub id: i64,
    seq: u64,
}

#[derive(Debug, Clone)]
pub struct DetailOverlay {
    view: OverlayView,
    seq: u64,
}

impl Default for DetailOverlay {
    fn default() -> Self {
        Self {
            view: OverlayView::Closed,
            seq: 0,
        }
    }
}

impl DetailOverlay {
    pub fn view(&self) -> &OverlayView {
        &self.view
    }

    pub fn is_open(&self) -> bool {
        self.view != OverlayView::Closed
    }

    /// Opens on `id` in the loading state, superseding any earlier selection.
    pub fn open(&mut self, id: i64) -> DetailTicket {
        self.seq += 1;
        self.view = OverlayView::Loading { id };
        DetailTicket { id, seq: self.seq }
    }

    /// Returns `false` if the selection changed or the overlay closed while
    /// the fetch was in flight.
    pub fn resolve(
        &mut self,
        ticket: DetailTicket,
        result: Result<CollectionDetail, ClientError>,
    ) -> bool {
        if ticket.seq != self.seq {
            return false;
        }
        self.view = match result {
            Ok(detail) => OverlayView::Loaded(Box::new(detail)),
            Err(e) => OverlayView::Failed {
                id: ticket.id,
                message: e.to_string(),
            },
        };
        true
    }

    /// The close button, a backdrop click and Escape all end up here.
    pub fn close(&mut self) {
        self.seq += 1;
        self.view = OverlayView::Closed;
    }

    /// Returns `true` when the event closed an open overlay.
    pub fn handle(&mut self, event: &OverlayEvent) -> bool {
        let dismiss = match event {
            OverlayEvent::CloseButton | OverlayEvent::BackdropClick => true,
            OverlayEvent::Key(key) => key == "Escape",
            OverlayEvent::PanelClick => false,
        };
        if !dismiss || !self.is_open() {
            return false;
        }
        self.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: i64) -> CollectionDetail {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "box_number": 0,
            "box_slot": 0,
            "species_name": "Lapras",
            "is_shiny": false
        }))
        .unwrap()
    }

    #[test]
    fn test_open_shows_loading_then_detail() {
        let mut overlay = DetailOverlay::default();
        let ticket = overlay.open(4);
        assert_eq!(*overlay.view(), OverlayView::Loading { id: 4 });

        assert!(overlay.resolve(ticket, Ok(detail(4))));
        assert!(matches!(overlay.view(), OverlayView::Loaded(d) if d.id == 4));
    }

    #[test]
    fn test_all_dismiss_paths_close() {
        for event in [
            OverlayEvent::CloseButton,
            OverlayEvent::BackdropClick,
            OverlayEvent::Key("Escape".into()),
        ] {
            let mut overlay = DetailOverlay::default();
            let ticket = overlay.open(1);
            overlay.resolve(ticket, Ok(detail(1)));

            assert!(overlay.handle(&event), "{event:?}");
            assert_eq!(*overlay.view(), OverlayView::Closed);
        }
    }

    #[test]
    fn test_panel_clicks_and_other_keys_do_not_close() {
        let mut overlay = DetailOverlay::default();
        let ticket = overlay.open(1);
        overlay.resolve(ticket, Ok(detail(1)));

        assert!(!overlay.handle(&OverlayEvent::PanelClick));
        assert!(!overlay.handle(&OverlayEvent::Key("Enter".into())));
        assert!(overlay.is_open());
    }

    #[test]
    fn test_dismiss_on_closed_overlay_is_noop() {
        let mut overlay = DetailOverlay::default();
        assert!(!overlay.handle(&OverlayEvent::CloseButton));
    }

    #[test]
    fn test_superseded_selection_is_ignored() {
        let mut overlay = DetailOverlay::default();
        let first = overlay.open(1);
        let second = overlay.open(2);

        assert!(!overlay.resolve(first, Ok(detail(1))));
        assert_eq!(*overlay.view(), OverlayView::Loading { id: 2 });
        assert!(overlay.resolve(second, Ok(detail(2))));
    }

    #[test]
    fn test_response_after_close_is_ignored() {
        let mut overlay = DetailOverlay::default();
        let ticket = overlay.open(3);
        overlay.handle(&OverlayEvent::BackdropClick);

        assert!(!overlay.resolve(ticket, Ok(detail(3))));
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_failed_fetch_stays_open_with_error() {
        let mut overlay = DetailOverlay::default();
        let ticket = overlay.open(99);
        overlay.resolve(ticket, Err(ClientError::NotFound("Pokémon 99 not found".into())));

        assert!(overlay.is_open());
        assert!(matches!(
            overlay.view(),
            OverlayView::Failed { id: 99, message } if message.contains("99")
        ));
    }
}
