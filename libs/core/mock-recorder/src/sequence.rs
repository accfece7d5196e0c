/// Orders expectations of one controller.
///
/// Each expectation added to a sequence can only be matched once the previous
/// one has reached its minimum call count. Matching a later link retires every
/// earlier link, so the sequence cannot move backwards.
///
/// ```ignore
/// let mut seq = Sequence::new();
/// mock.expect().get_agent_info(any()).in_sequence(&mut seq);
/// mock.expect().get_schemas(any()).in_sequence(&mut seq);
/// ```
#[derive(Debug, Default)]
pub struct Sequence {
    owner: Option<usize>,
    last: Option<usize>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `expectation`, returning the link it has to wait for.
    ///
    /// Fails with the owning controller's id when the sequence belongs to
    /// another controller.
    pub(crate) fn push(&mut self, controller: usize, expectation: usize) -> Result<Option<usize>, usize> {
        match self.owner {
            Some(owner) if owner != controller => Err(owner),
            _ => {
                self.owner = Some(controller);
                Ok(self.last.replace(expectation))
            }
        }
    }
}
