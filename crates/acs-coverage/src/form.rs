//! Create-condominium wizard view-model
//!
//! Holds the state the three-step form needs: which step is showing,
//! whether an agent is assigned, the fields entered so far, and whether a
//! submission is in flight. Rendering is left to the caller.

use crate::calculator::{CoverageResult, StatusPolicy};
use crate::condominium::{CondominiumForm, CondominiumPayload};
use crate::range::{parse_detailed, ParseOutcome};
use crate::result::{AcsResult, CoverageError};
use tracing::{debug, warn};

/// Number of steps in the wizard
pub const STEP_COUNT: u8 = 3;

/// Navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMove {
    /// Forward one step
    Next,
    /// Back one step
    Prev,
    /// Jump to a step (1-based)
    To(u8),
}

/// Wizard state for one form instance
#[derive(Debug, Clone)]
pub struct FormWizard {
    current_step: u8,
    has_acs: bool,
    is_loading: bool,
    policy: StatusPolicy,
    /// Fields entered so far
    pub form: CondominiumForm,
}

impl Default for FormWizard {
    fn default() -> Self {
        Self::new(StatusPolicy::default())
    }
}

impl FormWizard {
    /// Fresh wizard on step 1
    #[must_use]
    pub fn new(policy: StatusPolicy) -> Self {
        Self {
            current_step: 1,
            has_acs: false,
            is_loading: false,
            policy,
            form: CondominiumForm::default(),
        }
    }

    /// Step currently shown (1-based)
    #[must_use]
    pub const fn current_step(&self) -> u8 {
        self.current_step
    }

    /// Whether the "back" control applies
    #[must_use]
    pub const fn can_go_back(&self) -> bool {
        self.current_step > 1
    }

    /// Whether this is the last step
    #[must_use]
    pub const fn is_last_step(&self) -> bool {
        self.current_step == STEP_COUNT
    }

    /// Whether an agent is assigned
    #[must_use]
    pub const fn has_acs(&self) -> bool {
        self.has_acs
    }

    /// Whether a submission is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Validate the fields owned by a step
    pub fn validate_step(&self, step: u8) -> AcsResult<()> {
        if step != 1 {
            return Ok(());
        }
        if self.form.nome.trim().is_empty() {
            return Err(CoverageError::validation(
                "nome",
                "Nome do condomínio é obrigatório",
            ));
        }
        let required = [
            ("torres", self.form.torres),
            ("apartamentos", self.form.apartamentos),
            ("moradores", self.form.moradores),
        ];
        for (field, value) in required {
            if value <= 0 {
                return Err(CoverageError::validation(field, "deve ser maior que zero"));
            }
        }
        Ok(())
    }

    /// Move between steps.
    ///
    /// The current step must validate before leaving it. Targets outside
    /// `1..=STEP_COUNT` leave the wizard where it is.
    pub fn navigate(&mut self, movement: StepMove) -> AcsResult<u8> {
        self.validate_step(self.current_step)?;

        let target = match movement {
            StepMove::Next => self.current_step.saturating_add(1),
            StepMove::Prev => self.current_step.saturating_sub(1),
            StepMove::To(step) => step,
        };

        if (1..=STEP_COUNT).contains(&target) {
            debug!(from = self.current_step, to = target, "wizard step change");
            self.current_step = target;
        }
        Ok(self.current_step)
    }

    /// Forward one step
    pub fn next(&mut self) -> AcsResult<u8> {
        self.navigate(StepMove::Next)
    }

    /// Back one step
    pub fn prev(&mut self) -> AcsResult<u8> {
        self.navigate(StepMove::Prev)
    }

    /// Jump to a step; targets outside `1..=STEP_COUNT` leave it unchanged
    pub fn go_to(&mut self, step: u8) -> AcsResult<u8> {
        self.navigate(StepMove::To(step))
    }

    /// Toggle the agent section; turning it off clears its fields
    pub fn set_has_acs(&mut self, has_acs: bool) {
        self.has_acs = has_acs;
        if !has_acs {
            self.form.acs_responsavel = None;
            self.form.blocos_ativos.clear();
        }
    }

    /// Set the agent name and covered blocks
    pub fn set_acs(&mut self, nome: impl Into<String>, blocos: impl Into<String>) {
        self.has_acs = true;
        self.form.acs_responsavel = Some(nome.into());
        self.form.blocos_ativos = blocos.into();
    }

    /// Parse diagnostics for the covered-blocks field
    #[must_use]
    pub fn range_diagnostics(&self) -> ParseOutcome {
        parse_detailed(&self.form.blocos_ativos, self.form.torres)
    }

    /// Live coverage for the progress bar
    #[must_use]
    pub fn preview(&self) -> CoverageResult {
        let result = self.form.coverage(self.policy);
        if self.has_acs && self.form.torres > 0 && self.range_diagnostics().looks_wrong() {
            warn!(
                blocos = %self.form.blocos_ativos,
                "no covered blocks recognised; check the range format"
            );
        }
        result
    }

    /// Mark a submission as started and build its payload.
    ///
    /// Fails with [`CoverageError::Busy`] while another submission is in
    /// flight. A validation failure leaves the wizard idle.
    pub fn begin_submit(&mut self) -> AcsResult<CondominiumPayload> {
        if self.is_loading {
            return Err(CoverageError::busy("submission already in progress"));
        }
        let payload = self.form.clone().into_payload(self.policy)?;
        self.is_loading = true;
        Ok(payload)
    }

    /// Mark the in-flight submission as finished
    pub fn finish_submit(&mut self) {
        self.is_loading = false;
    }

    /// Back to a blank step 1
    pub fn reset(&mut self) {
        *self = Self::new(self.policy);
    }
}
