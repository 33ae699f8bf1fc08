//! 평가 보고서 조립과 내보내기(텍스트/CSV/JSON).
//!
//! 계산 결과는 반올림하지 않고 보관하며, 텍스트 출력에서만 자릿수를 맞춘다.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::form::InitiativeForm;
use crate::i18n::{keys, Translator};
use crate::projection::{ProjectionError, ProjectionResult};
use crate::risk::RiskSummary;
use crate::scoring::{utility_analysis, UtilityResult};

/// 보고서 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(ExportFormat::Text),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error("CSV 출력 실패: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON 직렬화 실패: {0}")]
    Json(#[from] serde_json::Error),
    #[error("보고서 출력 실패: {0}")]
    Write(#[from] std::io::Error),
    #[error("{} 파일 쓰기 실패: {source}", .path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// 금액 표시 형식.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatting {
    pub currency_symbol: String,
    pub decimals: u8,
}

impl Default for Formatting {
    fn default() -> Self {
        Self {
            currency_symbol: "€".to_string(),
            decimals: 2,
        }
    }
}

impl From<&Config> for Formatting {
    fn from(cfg: &Config) -> Self {
        Self {
            currency_symbol: cfg.currency_symbol.clone(),
            decimals: cfg.decimals,
        }
    }
}

impl Formatting {
    /// 천 단위 구분 기호를 넣은 금액 문자열. 예: `€ 1,234.50`
    pub fn amount(&self, value: f64) -> String {
        let raw = format!("{:.*}", self.decimals as usize, value.abs());
        let (int_part, frac_part) = match raw.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (raw.as_str(), None),
        };
        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if let Some(frac) = frac_part {
            grouped.push('.');
            grouped.push_str(frac);
        }
        // -0.00 처럼 반올림 후 0이 되는 값에는 부호를 붙이지 않는다.
        let negative = value < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };
        if self.currency_symbol.is_empty() {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{} {grouped}", self.currency_symbol)
        }
    }
}

/// 질문지 입력과 파생 지표를 묶은 보고서.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub form: InitiativeForm,
    pub projection: ProjectionResult,
    /// 가중치 합이 100%가 아니면 None
    pub utility: Option<UtilityResult>,
    pub risk_summary: RiskSummary,
}

impl Report {
    /// 폼에서 투영/효용 분석/위험 요약을 계산해 보고서를 만든다.
    pub fn build(form: &InitiativeForm) -> Result<Self, ReportError> {
        let projection = form.to_projection_input().evaluate()?;
        let utility = match utility_analysis(&form.scores(), &form.weights) {
            Ok(u) => Some(u),
            Err(e) => {
                debug!("utility analysis skipped: {e}");
                None
            }
        };
        Ok(Self {
            form: form.clone(),
            projection,
            utility,
            risk_summary: form.risks.summary(),
        })
    }

    /// 선택한 형식으로 출력 대상에 쓴다.
    pub fn write<W: Write>(
        &self,
        format: ExportFormat,
        fmt: &Formatting,
        tr: &Translator,
        out: &mut W,
    ) -> Result<(), ReportError> {
        match format {
            ExportFormat::Text => self.write_text(fmt, tr, out)?,
            ExportFormat::Csv => write_csv(&self.projection, &mut *out)?,
            ExportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn render(
        &self,
        format: ExportFormat,
        fmt: &Formatting,
        tr: &Translator,
    ) -> Result<String, ReportError> {
        let mut buf = Vec::new();
        self.write(format, fmt, tr, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// 파일로 저장한다.
    pub fn write_to(
        &self,
        path: &Path,
        format: ExportFormat,
        fmt: &Formatting,
        tr: &Translator,
    ) -> Result<(), ReportError> {
        let mut file = fs::File::create(path).map_err(|source| ReportError::File {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(format, fmt, tr, &mut file)?;
        info!("{} report written to {}", format.as_str(), path.display());
        Ok(())
    }

    fn write_text<W: Write>(
        &self,
        fmt: &Formatting,
        tr: &Translator,
        out: &mut W,
    ) -> Result<(), ReportError> {
        let project = &self.form.project;
        writeln!(out, "=== {}: {} ===", tr.t(keys::REPORT_TITLE), project.name)?;
        if !project.description.is_empty() {
            writeln!(out, "{}", project.description)?;
        }
        writeln!(out, "{} {}", tr.t(keys::REPORT_OWNER), project.owner)?;
        let decision_key = format!("decision.{}", self.form.decision.decision.key());
        writeln!(out, "{} {}", tr.t(keys::REPORT_DECISION), tr.t(&decision_key))?;
        writeln!(out)?;
        write_projection_text(&self.projection, fmt, tr, out)?;

        writeln!(out)?;
        writeln!(out, "{}", tr.t(keys::REPORT_RISK_HEADING))?;
        let risks = &self.risk_summary;
        writeln!(
            out,
            "{} {}/{}/{}",
            tr.t(keys::REPORT_RISK_COUNTS),
            risks.low,
            risks.medium,
            risks.high
        )?;
        if let Some((description, exposure)) = &risks.highest {
            writeln!(
                out,
                "{} {:.2}",
                tr.t(keys::REPORT_RISK_MEAN),
                risks.mean_exposure
            )?;
            writeln!(
                out,
                "{} {description} ({exposure:.2})",
                tr.t(keys::REPORT_RISK_HIGHEST)
            )?;
        }

        writeln!(out)?;
        writeln!(out, "{}", tr.t(keys::REPORT_UTILITY_HEADING))?;
        match &self.utility {
            Some(utility) => write_utility_text(utility, tr, out)?,
            None => writeln!(out, "{}", tr.t(keys::REPORT_UTILITY_UNAVAILABLE))?,
        }
        Ok(())
    }
}

/// 투영 요약과 연도별 표를 텍스트로 쓴다. 질문지 매출 단계에서도 사용한다.
pub fn write_projection_text<W: Write>(
    projection: &ProjectionResult,
    fmt: &Formatting,
    tr: &Translator,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{}", tr.t(keys::REPORT_PROJECTION_HEADING))?;
    writeln!(
        out,
        "{} {}",
        tr.t(keys::REPORT_TOTAL_REVENUE),
        fmt.amount(projection.total_revenue)
    )?;
    writeln!(
        out,
        "{} {}",
        tr.t(keys::REPORT_TOTAL_COST),
        fmt.amount(projection.total_cost)
    )?;
    writeln!(
        out,
        "{} {}",
        tr.t(keys::REPORT_TOTAL_PROFIT),
        fmt.amount(projection.total_profit)
    )?;
    match projection.roi_percent {
        Some(roi) => writeln!(out, "{} {roi:.2}%", tr.t(keys::REPORT_ROI))?,
        None => writeln!(out, "{}", tr.t(keys::REPORT_ROI_UNDEFINED))?,
    }
    match projection.breakeven_year {
        Some(year) => writeln!(
            out,
            "{} {year:.2} {}",
            tr.t(keys::REPORT_BREAKEVEN),
            tr.t(keys::REPORT_YEARS_UNIT)
        )?,
        None => writeln!(out, "{}", tr.t(keys::REPORT_NO_BREAKEVEN))?,
    }

    let headers = [
        keys::COL_REVENUE,
        keys::COL_SAVINGS,
        keys::COL_COST,
        keys::COL_PROFIT,
        keys::COL_CUM_REVENUE,
        keys::COL_CUM_COST,
        keys::COL_CUM_PROFIT,
    ];
    let rows: Vec<[String; 7]> = projection
        .years
        .iter()
        .map(|r| {
            [
                r.revenue,
                r.savings,
                r.cost,
                r.profit,
                r.cumulative_revenue,
                r.cumulative_cost,
                r.cumulative_profit,
            ]
            .map(|v| fmt.amount(v))
        })
        .collect();
    let mut widths = headers.map(|h| tr.t(h).chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let year_label = tr.t(keys::COL_YEAR);
    let year_width = year_label.chars().count().max(4);

    write!(out, "{year_label:>year_width$}")?;
    for (h, w) in headers.iter().zip(widths.iter()) {
        write!(out, "  {:>w$}", tr.t(h), w = *w)?;
    }
    writeln!(out)?;
    for (record, row) in projection.years.iter().zip(rows.iter()) {
        write!(out, "{:>year_width$}", record.year)?;
        for (cell, w) in row.iter().zip(widths.iter()) {
            write!(out, "  {cell:>w$}", w = *w)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_utility_text<W: Write>(
    utility: &UtilityResult,
    tr: &Translator,
    out: &mut W,
) -> std::io::Result<()> {
    for row in &utility.rows {
        let key = format!("criterion.{}", row.criterion.key());
        writeln!(
            out,
            "{:<36} {:>2}  x {:>5.1}%  = {:.2}",
            tr.t(&key),
            row.score,
            row.weight_percent,
            row.weighted_score
        )?;
    }
    writeln!(
        out,
        "{} {:.2}",
        tr.t(keys::REPORT_UTILITY_TOTAL),
        utility.total_score
    )
}

/// 연도별 표를 CSV로 쓴다. 값은 반올림하지 않는다.
pub fn write_csv<W: Write>(projection: &ProjectionResult, out: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record([
        "year",
        "revenue",
        "savings",
        "cost",
        "profit",
        "cumulative_revenue",
        "cumulative_cost",
        "cumulative_profit",
    ])?;
    for r in &projection.years {
        writer.write_record([
            r.year.to_string(),
            r.revenue.to_string(),
            r.savings.to_string(),
            r.cost.to_string(),
            r.profit.to_string(),
            r.cumulative_revenue.to_string(),
            r.cumulative_cost.to_string(),
            r.cumulative_profit.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_are_grouped_by_thousands() {
        let fmt = Formatting::default();
        assert_eq!(fmt.amount(1234567.891), "€ 1,234,567.89");
        assert_eq!(fmt.amount(999.0), "€ 999.00");
        assert_eq!(fmt.amount(-1000.0), "-€ 1,000.00");
    }

    #[test]
    fn rounded_zero_has_no_sign() {
        let fmt = Formatting {
            currency_symbol: String::new(),
            decimals: 0,
        };
        assert_eq!(fmt.amount(-0.2), "0");
        assert_eq!(fmt.amount(100000.0), "100,000");
    }
}
