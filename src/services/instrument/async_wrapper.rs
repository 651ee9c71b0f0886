use crate::record::{ArgList, CallOutcome};
use crate::services::classifier::CallableInfo;
use std::future::{poll_fn, Future};
use std::panic::{self, AssertUnwindSafe};
use std::pin::pin;
use std::task::Poll;

use super::invoke::Invoke;
use super::logger::Logger;
use super::outcome::{panic_failure, Outcome};

/// Обёртка для функций, возвращающих future. Семантика та же, что у
/// [`super::Instrumented`]: каждый `poll` выполняется под `catch_unwind`.
/// Future, отброшенная до завершения (отмена), записи не создаёт.
pub struct InstrumentedAsync<F> {
    logger: Logger,
    info: CallableInfo,
    func: F,
}

impl<F> InstrumentedAsync<F> {
    pub(crate) fn new(logger: Logger, info: CallableInfo, func: F) -> Self {
        Self { logger, info, func }
    }

    pub fn info(&self) -> &CallableInfo {
        &self.info
    }

    pub async fn call<A, Fut>(&self, args: A) -> Fut::Output
    where
        F: Invoke<A, Output = Fut>,
        Fut: Future,
        Fut::Output: Outcome,
        A: ArgList,
    {
        let settings = self.logger.snapshot();
        if !settings.enabled {
            return self.func.invoke(args).await;
        }

        let captured = args.capture_all();
        let mut fut = pin!(self.func.invoke(args));

        let polled = poll_fn(|cx| {
            match panic::catch_unwind(AssertUnwindSafe(|| fut.as_mut().poll(cx))) {
                Ok(Poll::Ready(output)) => Poll::Ready(Ok(output)),
                Ok(Poll::Pending) => Poll::Pending,
                Err(payload) => Poll::Ready(Err(payload)),
            }
        })
        .await;

        match polled {
            Ok(output) => {
                self.logger
                    .finalize(&settings, &self.info, captured, output.observe());
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
