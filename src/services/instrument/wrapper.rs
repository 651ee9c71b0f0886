use crate::record::CallOutcome;
use crate::services::classifier::CallableInfo;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use super::capture::{CaptureMode, Debugged, Fallible, Natural};
use super::invoke::Invoke;
use super::logger::Logger;
use super::outcome::panic_failure;

/// Обёрнутая функция: тот же результат, та же ошибка, та же паника,
/// плюс одна запись в журнале на каждый вызов.
///
/// `M` задаёт режим захвата аргументов и результата, см. [`super::capture`].
pub struct Instrumented<F, M = Natural> {
    logger: Logger,
    info: CallableInfo,
    func: F,
    mode: PhantomData<fn() -> M>,
}

impl<F, M> Instrumented<F, M> {
    pub(crate) fn new(logger: Logger, info: CallableInfo, func: F) -> Self {
        Self {
            logger,
            info,
            func,
            mode: PhantomData,
        }
    }

    pub fn info(&self) -> &CallableInfo {
        &self.info
    }

    pub fn into_inner(self) -> F {
        self.func
    }

    fn with_mode<N>(self) -> Instrumented<F, N> {
        Instrumented::new(self.logger, self.info, self.func)
    }

    /// Аргументы и результат фиксируются через `Debug`
    pub fn debugged(self) -> Instrumented<F, Debugged> {
        self.with_mode()
    }

    /// Как [`Instrumented::debugged`], но `Err` записывается как ошибка вызова
    pub fn fallible(self) -> Instrumented<F, Fallible> {
        self.with_mode()
    }

    /// Вызов с аргументами-кортежем: `add.call((2, 3))`.
    ///
    /// Аргументы фиксируются до выполнения. `Err` и паника записываются
    /// с уровнем `error`, после чего `Err` возвращается как есть, а паника
    /// продолжает раскрутку с исходным payload.
    pub fn call<A>(&self, args: A) -> <F as Invoke<A>>::Output
    where
        F: Invoke<A>,
        M: CaptureMode<A, <F as Invoke<A>>::Output>,
    {
        let settings = self.logger.snapshot();
        if !settings.enabled {
            return self.func.invoke(args);
        }

        let captured = M::capture_args(&args);

        match panic::catch_unwind(AssertUnwindSafe(|| self.func.invoke(args))) {
            Ok(output) => {
                self.logger
                    .finalize(&settings, &self.info, captured, M::observe(&output));
                output
            }
            Err(payload) => {
                self.logger.finalize(
                    &settings,
                    &self.info,
                    captured,
                    CallOutcome::Failed(panic_failure(payload.as_ref())),
                );
                panic::resume_unwind(payload)
            }
        }
    }
}

impl<F: Clone, M> Clone for Instrumented<F, M> {
    fn clone(&self) -> Self {
        Self::new(self.logger.clone(), self.info.clone(), self.func.clone())
    }
}

impl<F, M> std::fmt::Debug for Instrumented<F, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instrumented")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}
