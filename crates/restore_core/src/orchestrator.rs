use crate::core_api::{CoreError, RestoreReport, SectionError, SectionFailure};
use crate::lookup::Registries;
use crate::node::Document;
use crate::registry::{SectionInput, SectionRegistry};
use crate::sections::standard_sections;
use crate::subject::Subject;

/// Dispatches each present section of a document to its handler, once, in
/// registry order.
///
/// A failure stops the walk. Sections applied before it stay applied; use
/// [`Orchestrator::restore_staged`] when that is not acceptable.
#[derive(Debug)]
pub struct Orchestrator {
    registry: SectionRegistry,
    registries: Registries,
}

impl Orchestrator {
    pub fn new(registry: SectionRegistry, registries: Registries) -> Self {
        Self {
            registry,
            registries,
        }
    }

    pub fn standard() -> Result<Self, CoreError> {
        Ok(Self::new(
            SectionRegistry::new(standard_sections())?,
            Registries::default(),
        ))
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn restore(&self, document: &Document, subject: &mut dyn Subject) -> RestoreReport {
        let mut report = RestoreReport::default();
        let descriptors = self.registry.descriptors();

        for (position, descriptor) in descriptors.iter().enumerate() {
            let present = descriptor.lookup(document);

            let result = match present {
                None if !descriptor.required => {
                    log::debug!(
                        "{}: section `{}` absent, skipped",
                        subject.identifier(),
                        descriptor.key
                    );
                    report.skipped.push(descriptor.key);
                    continue;
                }
                None => Err(SectionError::RequiredSectionMissing(
                    descriptor.key.to_string(),
                )),
                Some(node) => {
                    let input = SectionInput {
                        key: descriptor.key,
                        node,
                        document,
                        registries: &self.registries,
                    };
                    (descriptor.handler)(&input, subject)
                }
            };

            match result {
                Ok(()) => {
                    log::debug!(
                        "{}: section `{}` applied",
                        subject.identifier(),
                        descriptor.key
                    );
                    report.applied.push(descriptor.key);
                }
                Err(error) => {
                    log::warn!(
                        "{}: restore aborted at section `{}`: {error}",
                        subject.identifier(),
                        descriptor.key
                    );
                    report.failure = Some(SectionFailure {
                        key: descriptor.key.to_string(),
                        error,
                    });
                    report.not_reached = descriptors[position + 1..]
                        .iter()
                        .map(|d| d.key)
                        .collect();
                    return report;
                }
            }
        }

        log::info!(
            "{}: restored {} sections, skipped {}",
            subject.identifier(),
            report.applied_count(),
            report.skipped_count()
        );
        report
    }

    /// Restores into a copy of `subject` and keeps the copy only when every
    /// section succeeded.
    pub fn restore_staged<S: Subject + Clone>(
        &self,
        document: &Document,
        subject: &mut S,
    ) -> RestoreReport {
        let mut staged = subject.clone();
        let report = self.restore(document, &mut staged);
        if report.is_complete() {
            *subject = staged;
        } else {
            log::warn!(
                "{}: staged restore discarded, subject left at its previous state",
                subject.identifier()
            );
        }
        report
    }
}
