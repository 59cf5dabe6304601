use crate::error::{PdfError, Result};

/// Lifecycle of a document.
///
/// While `Open`, every allocated object that has not been finalized counts
/// as outstanding. `end()` moves to `Closing` when some objects are still
/// pending, or straight to `Closed` when none are. The trailer is written on
/// the single transition into `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    Open { outstanding: usize },
    Closing { pending: usize },
    Closed,
    Failed,
}

/// What the engine has to do after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub(crate) enum Transition {
    Continue,
    EmitTrailer,
}

impl DocumentState {
    pub fn outstanding(&self) -> usize {
        match *self {
            DocumentState::Open { outstanding } => outstanding,
            DocumentState::Closing { pending } => pending,
            DocumentState::Closed | DocumentState::Failed => 0,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, DocumentState::Closed)
    }

    /// Objects may still be allocated while closing; they delay the trailer.
    pub(crate) fn allocate(&mut self) -> Result<()> {
        match self {
            DocumentState::Open { outstanding } => *outstanding += 1,
            DocumentState::Closing { pending } => *pending += 1,
            _ => return Err(self.unusable()),
        }
        Ok(())
    }

    /// One object was finalized.
    pub(crate) fn settle(&mut self) -> Result<Transition> {
        match *self {
            DocumentState::Open { outstanding: 0 } | DocumentState::Closing { pending: 0 } => Err(
                PdfError::ProtocolViolation("settled more objects than were allocated".to_string()),
            ),
            DocumentState::Open { outstanding } => {
                *self = DocumentState::Open {
                    outstanding: outstanding - 1,
                };
                Ok(Transition::Continue)
            }
            DocumentState::Closing { pending: 1 } => {
                *self = DocumentState::Closed;
                Ok(Transition::EmitTrailer)
            }
            DocumentState::Closing { pending } => {
                *self = DocumentState::Closing {
                    pending: pending - 1,
                };
                Ok(Transition::Continue)
            }
            DocumentState::Closed | DocumentState::Failed => Err(self.unusable()),
        }
    }

    pub(crate) fn close(&mut self) -> Result<Transition> {
        match *self {
            DocumentState::Open { outstanding: 0 } => {
                *self = DocumentState::Closed;
                Ok(Transition::EmitTrailer)
            }
            DocumentState::Open { outstanding } => {
                *self = DocumentState::Closing {
                    pending: outstanding,
                };
                Ok(Transition::Continue)
            }
            DocumentState::Closing { .. } => Err(PdfError::ProtocolViolation(
                "end() was already called".to_string(),
            )),
            DocumentState::Closed | DocumentState::Failed => Err(self.unusable()),
        }
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        match self {
            DocumentState::Open { .. } => Ok(()),
            DocumentState::Closing { .. } => Err(PdfError::ProtocolViolation(
                "document is closing".to_string(),
            )),
            _ => Err(self.unusable()),
        }
    }

    /// Open or Closing.
    pub(crate) fn ensure_live(&self) -> Result<()> {
        match self {
            DocumentState::Open { .. } | DocumentState::Closing { .. } => Ok(()),
            _ => Err(self.unusable()),
        }
    }

    fn unusable(&self) -> PdfError {
        match self {
            DocumentState::Failed => {
                PdfError::ProtocolViolation("document failed earlier".to_string())
            }
            _ => PdfError::ProtocolViolation("document is closed".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_with_nothing_pending_emits_trailer() {
        let mut state = DocumentState::Open { outstanding: 0 };
        assert_eq!(state.close().unwrap(), Transition::EmitTrailer);
        assert!(state.is_closed());
    }

    #[test]
    fn test_last_settle_while_closing_emits_trailer_once() {
        let mut state = DocumentState::Open { outstanding: 0 };
        state.allocate().unwrap();
        state.allocate().unwrap();
        assert_eq!(state.close().unwrap(), Transition::Continue);
        assert_eq!(state, DocumentState::Closing { pending: 2 });

        assert_eq!(state.settle().unwrap(), Transition::Continue);
        assert_eq!(state.settle().unwrap(), Transition::EmitTrailer);
        assert!(state.settle().is_err());
    }

    #[test]
    fn test_allocation_while_closing_delays_trailer() {
        let mut state = DocumentState::Closing { pending: 1 };
        state.allocate().unwrap();
        assert_eq!(state.settle().unwrap(), Transition::Continue);
        assert_eq!(state.settle().unwrap(), Transition::EmitTrailer);
    }

    #[test]
    fn test_end_twice_is_rejected() {
        let mut state = DocumentState::Open { outstanding: 1 };
        let _ = state.close().unwrap();
        assert!(matches!(state.close(), Err(PdfError::ProtocolViolation(_))));
    }

    #[test]
    fn test_closed_and_failed_reject_everything() {
        for mut state in [DocumentState::Closed, DocumentState::Failed] {
            assert!(state.allocate().is_err());
            assert!(state.settle().is_err());
            assert!(state.close().is_err());
            assert!(state.ensure_live().is_err());
            assert_eq!(state.outstanding(), 0);
        }
    }

    #[test]
    fn test_settle_below_zero_is_rejected() {
        let mut state = DocumentState::Open { outstanding: 0 };
        assert!(state.settle().is_err());
    }
}
