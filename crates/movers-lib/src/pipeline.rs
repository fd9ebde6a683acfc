//! End-to-end movers pipeline.

use chrono::{DateTime, Utc};
use futures::future::try_join;
use movers_chart::{ChartPayload, ChartSources, assemble, chart_tickers};
use movers_rank::{MoverReport, daily_report, weekly_report};
use movers_types::{BarMatrix, DateRange, Interval, MoversError, Result};
use movers_universe::Universe;
use tracing::info;

use crate::{HistoryProvider, HistoryRequest, Lookback, PipelineConfig};

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Daily movers.
    pub daily: MoverReport,
    /// Weekly movers over the last completed trading week.
    pub weekly: MoverReport,
    /// Chart payloads of every daily and weekly mover.
    pub charts: Vec<ChartPayload>,
}

/// Ties a history provider, a universe and a configuration together.
#[derive(Debug)]
pub struct Pipeline<P> {
    provider: P,
    universe: Universe,
    config: PipelineConfig,
}

impl<P: HistoryProvider> Pipeline<P> {
    /// Creates a pipeline.
    pub fn new(provider: P, universe: Universe, config: PipelineConfig) -> Self {
        Self {
            provider,
            universe,
            config,
        }
    }

    /// Returns the instrument universe.
    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    async fn fetch(
        &self,
        tickers: &[String],
        interval: Interval,
        lookback: Lookback,
    ) -> Result<BarMatrix> {
        let request = HistoryRequest::new(tickers, interval, lookback);
        self.provider.history(&request).await
    }

    async fn fetch_required(
        &self,
        tickers: &[String],
        interval: Interval,
        lookback: Lookback,
    ) -> Result<BarMatrix> {
        let matrix = self.fetch(tickers, interval, lookback).await?;
        if matrix.is_empty() {
            return Err(MoversError::NoData { interval });
        }
        Ok(matrix)
    }

    /// Ranks the latest session against the previous one.
    ///
    /// # Errors
    ///
    /// Returns [`MoversError::NoData`] if the provider has no daily bars and
    /// [`MoversError::EmptyUniverse`] if no instrument has two closes.
    pub async fn daily_report(&self) -> Result<MoverReport> {
        let tickers = self.universe.tickers();
        let matrix = self
            .fetch_required(
                tickers,
                Interval::Day1,
                Lookback::Days(self.config.daily_lookback_days),
            )
            .await?;
        daily_report(&matrix, tickers, self.config.mover_limit)
    }

    /// Ranks the last trading week completed as of `generated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`MoversError::NoData`] if the provider has no bars for the
    /// week and [`MoversError::EmptyUniverse`] if no instrument has two
    /// closes in it.
    pub async fn weekly_report(&self, generated_at: DateTime<Utc>) -> Result<MoverReport> {
        let window = DateRange::completed_trading_week(generated_at.date_naive());
        let tickers = self.universe.tickers();
        let matrix = self
            .fetch_required(tickers, Interval::Day1, Lookback::Range(window))
            .await?;
        weekly_report(&matrix, tickers, window, self.config.mover_limit)
    }

    /// Builds chart payloads for the given tickers.
    ///
    /// # Errors
    ///
    /// Returns [`MoversError::NoData`] if the provider has no daily bars.
    /// Missing intraday bars leave the intraday timeframes empty.
    pub async fn chart_payloads(&self, tickers: &[String]) -> Result<Vec<ChartPayload>> {
        self.chart_payloads_with(tickers, |_, _| {}).await
    }

    /// Builds chart payloads, calling `on_payload` with each payload and the
    /// total number of payloads.
    ///
    /// # Errors
    ///
    /// Returns [`MoversError::NoData`] if the provider has no daily bars.
    pub async fn chart_payloads_with<F>(
        &self,
        tickers: &[String],
        mut on_payload: F,
    ) -> Result<Vec<ChartPayload>>
    where
        F: FnMut(&ChartPayload, usize),
    {
        if tickers.is_empty() {
            return Ok(Vec::new());
        }
        let lookback = |interval| Lookback::Days(self.config.chart_lookback_days(interval));

        let daily = self
            .fetch_required(tickers, Interval::Day1, lookback(Interval::Day1))
            .await?;
        let (m15, h1) = try_join(
            self.fetch(tickers, Interval::Minute15, lookback(Interval::Minute15)),
            self.fetch(tickers, Interval::Hour1, lookback(Interval::Hour1)),
        )
        .await?;

        let sources = ChartSources {
            daily: &daily,
            m15: (!m15.is_empty()).then_some(&m15),
            h1: (!h1.is_empty()).then_some(&h1),
        };
        let payloads: Vec<ChartPayload> = tickers
            .iter()
            .map(|ticker| {
                let payload = assemble(ticker, &sources, &self.config.bar_caps);
                on_payload(&payload, tickers.len());
                payload
            })
            .collect();

        info!(charts = payloads.len(), "chart payloads assembled");
        Ok(payloads)
    }

    /// Runs both reports and charts every mover.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of any stage.
    pub async fn run(&self, generated_at: DateTime<Utc>) -> Result<RunOutput> {
        self.run_with(generated_at, |_, _| {}).await
    }

    /// Runs both reports and charts every mover, calling `on_payload` after
    /// each chart.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error of any stage.
    pub async fn run_with<F>(&self, generated_at: DateTime<Utc>, on_payload: F) -> Result<RunOutput>
    where
        F: FnMut(&ChartPayload, usize),
    {
        let daily = self.daily_report().await?;
        let weekly = self.weekly_report(generated_at).await?;
        let tickers = chart_tickers(daily.mover_tickers().chain(weekly.mover_tickers()));
        info!(
            daily = daily.all.len(),
            weekly = weekly.all.len(),
            charted = tickers.len(),
            "reports ranked"
        );
        let charts = self.chart_payloads_with(&tickers, on_payload).await?;
        Ok(RunOutput {
            daily,
            weekly,
            charts,
        })
    }
}
