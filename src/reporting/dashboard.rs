use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::analysis::aggregator::ClusterOverview;
use crate::analysis::snapshot::DashboardSnapshot;
use crate::core::constants::{ANALYZER_COMMAND, reports, server};
use crate::core::error::{DashboardError, Result};
use crate::discovery::SkippedReport;
use crate::reporting::charts::{
    self, ChartSpec, GaugeSpec, HealthBand, HealthTableRow, MetricCard,
};

/// Constants for dashboard styling and layout
mod dashboard_constants {
    /// Chart.js CDN URL for rendering charts
    pub const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

    /// Rows shown per page in the health check table
    pub const TABLE_PAGE_SIZE: usize = 15;

    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
}

/// How the page behaves once in the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Seconds between automatic page reloads
    pub refresh_interval_secs: u64,
    /// Served by the dashboard server; static exports have no refresh controls
    pub live: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            refresh_interval_secs: server::DEFAULT_REFRESH_INTERVAL_SECONDS,
            live: true,
        }
    }
}

impl RenderOptions {
    pub fn static_export() -> Self {
        Self {
            live: false,
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageConfig<'a> {
    refresh_interval_ms: u64,
    live: bool,
    page_size: usize,
    charts: &'a [ChartSpec],
}

/// Escape text for safe interpolation into HTML element content and attributes
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Serialize a value for embedding inside a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| DashboardError::Render(format!("Failed to serialize page data: {e}")))?;
    Ok(json.replace("</", "<\\/"))
}

/// HTML dashboard generator for Kafka analysis snapshots
pub struct HtmlDashboard;

impl HtmlDashboard {
    /// Render the complete page for a snapshot
    pub fn render(snapshot: &DashboardSnapshot, options: &RenderOptions) -> Result<String> {
        let charts = Self::collect_charts(snapshot);
        let page_config = PageConfig {
            refresh_interval_ms: options.refresh_interval_secs.saturating_mul(1000),
            live: options.live,
            page_size: dashboard_constants::TABLE_PAGE_SIZE,
            charts: &charts,
        };

        let css_styles = Self::generate_css();
        let js_scripts = Self::generate_javascript();
        let body_content = Self::generate_body_content(snapshot, options, &charts);

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Kafka Dashboard</title>
    <script src="{}"></script>
    <style>{}</style>
</head>
<body>
    {}
    <script>window.dashboardConfig = {};</script>
    <script>{}</script>
</body>
</html>"#,
            dashboard_constants::CHART_JS_CDN,
            css_styles,
            body_content,
            script_json(&page_config)?,
            js_scripts
        ))
    }

    /// Render the page and write it to `output_path`
    pub fn generate_dashboard<P: AsRef<Path>>(
        snapshot: &DashboardSnapshot,
        options: &RenderOptions,
        output_path: P,
    ) -> Result<()> {
        let html_content = Self::render(snapshot, options)?;
        fs::write(output_path, html_content)?;
        Ok(())
    }

    fn collect_charts(snapshot: &DashboardSnapshot) -> Vec<ChartSpec> {
        let mut charts = Vec::new();
        if let Some(overview) = &snapshot.overview {
            let topics = snapshot
                .latest
                .as_ref()
                .map(|loaded| loaded.report.topics.as_slice())
                .unwrap_or_default();
            charts.extend(charts::overview_charts(overview, topics));
        }
        charts.push(charts::health_score_trend(&snapshot.health_trend));
        charts.push(charts::topics_trend(&snapshot.topics_trend));
        charts
    }

    fn generate_css() -> &'static str {
        r#"
        :root {
            --primary-color: #007bff;
            --success-color: #28a745;
            --warning-color: #ffc107;
            --error-color: #dc3545;
            --info-color: #17a2b8;
            --secondary-color: #6c757d;
            --bg-color: #f8f9fa;
            --card-bg: #ffffff;
            --border-color: #dee2e6;
            --text-primary: #1e293b;
            --text-secondary: #64748b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: 'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-primary);
            line-height: 1.6;
        }

        .container { max-width: 1400px; margin: 0 auto; padding: 2rem; }

        .header { text-align: center; margin-bottom: 1.5rem; }
        .header h1 { font-size: 2.25rem; font-weight: 700; color: var(--primary-color); }
        .header p { color: var(--text-secondary); font-size: 1.1rem; }

        .controls {
            display: flex;
            align-items: center;
            justify-content: space-between;
            margin-bottom: 1.5rem;
        }

        .btn {
            background: var(--primary-color);
            color: white;
            border: none;
            border-radius: 6px;
            padding: 0.4rem 0.9rem;
            cursor: pointer;
            font-size: 0.9rem;
        }
        .btn:disabled { opacity: 0.6; cursor: wait; }
        .btn-outline { background: transparent; color: var(--secondary-color); border: 1px solid var(--border-color); }

        .muted { color: var(--text-secondary); font-size: 0.85rem; }

        .grid { display: grid; gap: 1.5rem; margin-bottom: 1.5rem; }
        .grid-6 { grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); }
        .grid-3 { grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); }
        .grid-2 { grid-template-columns: repeat(auto-fit, minmax(420px, 1fr)); }

        .card {
            background: var(--card-bg);
            border: 1px solid var(--border-color);
            border-radius: 12px;
            box-shadow: 0 2px 4px -1px rgba(0, 0, 0, 0.06);
            padding: 1.25rem;
        }
        .card h3 { font-size: 1.1rem; font-weight: 600; margin-bottom: 0.25rem; }
        .card .subtitle { color: var(--text-secondary); font-size: 0.8rem; margin-bottom: 1rem; }

        .metric { display: flex; align-items: center; gap: 1rem; }
        .metric-icon { font-size: 2rem; }
        .metric-value { font-size: 1.6rem; font-weight: 700; color: var(--primary-color); }
        .metric-title { color: var(--text-secondary); font-size: 0.8rem; }
        .border-left-primary { border-left: 4px solid var(--primary-color); }
        .border-left-success { border-left: 4px solid var(--success-color); }
        .border-left-info { border-left: 4px solid var(--info-color); }
        .border-left-warning { border-left: 4px solid var(--warning-color); }
        .border-left-secondary { border-left: 4px solid var(--secondary-color); }

        .gauge-value { font-size: 3rem; font-weight: 700; text-align: center; }
        .gauge-track {
            position: relative;
            display: flex;
            height: 18px;
            border-radius: 9px;
            overflow: hidden;
            margin: 1rem 0 0.5rem;
        }
        .gauge-marker, .gauge-target {
            position: absolute;
            top: -4px;
            bottom: -4px;
            width: 4px;
        }
        .gauge-marker { background: var(--text-primary); }
        .gauge-target { background: red; }
        .gauge-legend { display: flex; justify-content: space-between; }

        .success { color: var(--success-color); }
        .warning { color: #b58900; }
        .error { color: var(--error-color); }

        .empty-chart {
            height: 240px;
            display: flex;
            align-items: center;
            justify-content: center;
            color: var(--secondary-color);
            font-size: 1rem;
        }

        .badge {
            display: inline-block;
            padding: 0.2rem 0.55rem;
            margin: 0 0.4rem 0.4rem 0;
            border-radius: 6px;
            background: var(--secondary-color);
            color: white;
            font-size: 0.8rem;
        }

        .info-list p { margin-bottom: 0.35rem; }

        .alert {
            background: #d1ecf1;
            border: 1px solid #bee5eb;
            color: #0c5460;
            border-radius: 12px;
            padding: 2rem;
            text-align: center;
            margin: 2rem 0;
        }
        .alert pre {
            background: rgba(255, 255, 255, 0.6);
            display: inline-block;
            text-align: left;
            padding: 0.75rem 1rem;
            border-radius: 6px;
            margin: 1rem 0;
        }
        .alert-warning { background: #fff3cd; border-color: #ffeeba; color: #856404; text-align: left; }

        .table-tools { display: flex; gap: 0.75rem; margin-bottom: 0.75rem; }
        .table-tools input, .table-tools select {
            padding: 0.35rem 0.6rem;
            border: 1px solid var(--border-color);
            border-radius: 6px;
        }
        .table-tools input { flex: 1; }
        table { width: 100%; border-collapse: collapse; font-size: 0.9rem; }
        th, td { border: 1px solid var(--border-color); padding: 0.6rem; text-align: left; vertical-align: top; }
        th { background: var(--bg-color); cursor: pointer; user-select: none; }
        tr.status-PASSED { background: #d4edda; }
        tr.status-FAILED { background: #f8d7da; }
        tr.status-WARNING { background: #fff3cd; }
        tr.status-INFO { background: #d1ecf1; }
        .pager { display: flex; align-items: center; justify-content: flex-end; gap: 0.75rem; margin-top: 0.75rem; }

        @media (max-width: 768px) {
            .container { padding: 1rem; }
            .grid-2, .grid-3 { grid-template-columns: 1fr; }
        }
        "#
    }

    /// Generate the main body content of the dashboard
    fn generate_body_content(
        snapshot: &DashboardSnapshot,
        options: &RenderOptions,
        charts: &[ChartSpec],
    ) -> String {
        let header_section = Self::generate_header_section();
        let controls_section = Self::generate_refresh_controls(snapshot, options);

        let main_content = match &snapshot.overview {
            Some(overview) => Self::generate_overview_content(snapshot, overview, charts),
            None => Self::generate_no_data_section(snapshot),
        };

        let trends_section = Self::generate_trends_section(charts);
        let skipped_section = Self::generate_skipped_section(&snapshot.skipped);

        format!(
            r#"
            <div class="container">
                {header_section}
                {controls_section}
                {main_content}
                {trends_section}
                {skipped_section}
            </div>
            "#
        )
    }

    fn generate_header_section() -> String {
        r#"
            <div class="header">
                <h1>🚀 Kafka Cluster Dashboard</h1>
                <p>Real-time monitoring and analysis of your Kafka cluster health</p>
            </div>
            "#
        .to_string()
    }

    fn generate_refresh_controls(snapshot: &DashboardSnapshot, options: &RenderOptions) -> String {
        let last_updated = snapshot
            .last_updated
            .format(dashboard_constants::TIMESTAMP_FORMAT)
            .to_string();

        let buttons = if options.live {
            format!(
                r#"<button id="refresh-button" class="btn">🔄 Refresh Now</button>
                   <span class="muted">Auto-refresh every {}s</span>"#,
                options.refresh_interval_secs
            )
        } else {
            r#"<span class="muted">Static export</span>"#.to_string()
        };

        format!(
            r#"
            <div class="controls">
                <div>{buttons}</div>
                <div class="muted">Last updated: <strong id="last-updated">{last_updated}</strong></div>
            </div>
            "#
        )
    }

    fn generate_no_data_section(snapshot: &DashboardSnapshot) -> String {
        format!(
            r#"
            <div class="alert">
                <h2>📊 No Data Available</h2>
                <p>No Kafka analysis reports matching <code>{}</code> were found in <code>{}</code>.</p>
                <p>Please run the analyzer first:</p>
                <pre>cd /path/to/kafka-analyzer
{}</pre>
                <p class="muted">Then refresh this dashboard to view the results.</p>
            </div>
            "#,
            reports::FILE_PATTERN,
            escape_html(&snapshot.data_dir.display().to_string()),
            ANALYZER_COMMAND
        )
    }

    fn generate_overview_content(
        snapshot: &DashboardSnapshot,
        overview: &ClusterOverview,
        charts: &[ChartSpec],
    ) -> String {
        let chart_card = |id: &str, description: &str| {
            charts
                .iter()
                .find(|chart| chart.id == id)
                .map(|chart| Self::generate_chart_card(chart, description))
                .unwrap_or_default()
        };

        let metrics_section = Self::generate_metrics_section(&charts::cluster_metrics(overview));
        let gauge_card = Self::generate_gauge_card(&charts::health_gauge(overview.health_score));
        let cluster_info = Self::generate_cluster_info_card(snapshot, overview);
        let table_rows = charts::health_table_rows(&overview.check_details);
        let table_section = Self::generate_health_table_section(&table_rows);

        format!(
            r#"
            {metrics_section}
            <div class="grid grid-3">
                {gauge_card}
                {}
                {}
            </div>
            <div class="grid grid-2">
                {}
                {}
            </div>
            <div class="grid grid-2">
                {}
                {cluster_info}
            </div>
            {table_section}
            "#,
            chart_card("health-checks-summary", "Breakdown of health check results"),
            chart_card("topics-distribution", "User vs Internal topics"),
            chart_card("partitions-chart", "Distribution of partitions across user topics"),
            chart_card("consumer-groups-chart", "Active vs Inactive consumer groups"),
            chart_card(
                "replication-factor-chart",
                "Distribution of replication factors across topics"
            ),
        )
    }

    fn generate_metrics_section(cards: &[MetricCard]) -> String {
        let cards_html = cards
            .iter()
            .map(|card| {
                format!(
                    r#"
                    <div class="card border-left-{}">
                        <div class="metric">
                            <div class="metric-icon">{}</div>
                            <div>
                                <div class="metric-value">{}</div>
                                <div class="metric-title">{}</div>
                            </div>
                        </div>
                    </div>
                    "#,
                    card.color,
                    card.icon,
                    escape_html(&card.value),
                    card.title
                )
            })
            .collect::<Vec<_>>()
            .join("");

        format!(r#"<div class="grid grid-6">{cards_html}</div>"#)
    }

    fn generate_gauge_card(gauge: &GaugeSpec) -> String {
        let steps_html = gauge
            .steps
            .iter()
            .map(|step| {
                format!(
                    r#"<div style="flex: {}; background: {};"></div>"#,
                    step.to - step.from,
                    step.color
                )
            })
            .collect::<Vec<_>>()
            .join("");

        let band_class = gauge.band.css_class();
        let band_label = match gauge.band {
            HealthBand::Healthy => "Healthy",
            HealthBand::Degraded => "Degraded",
            HealthBand::Critical => "Critical",
        };

        format!(
            r#"
            <div class="card">
                <h3>Cluster Health Score</h3>
                <div class="subtitle">Overall health percentage based on passed checks</div>
                <div class="gauge-value" style="color: {};">{:.1}%</div>
                <div class="gauge-track">
                    {steps_html}
                    <div class="gauge-marker" style="left: calc({:.1}% - 2px);"></div>
                    <div class="gauge-target" style="left: calc({:.1}% - 2px);" title="Target: {:.0}%"></div>
                </div>
                <div class="gauge-legend muted">
                    <span>0</span>
                    <span class="{band_class}">{band_label}</span>
                    <span>100</span>
                </div>
            </div>
            "#,
            gauge.color, gauge.value, gauge.value, gauge.target, gauge.target
        )
    }

    fn generate_chart_card(chart: &ChartSpec, description: &str) -> String {
        let body = match chart.empty_message {
            Some(message) => format!(r#"<div class="empty-chart">{}</div>"#, escape_html(message)),
            None => format!(r#"<canvas id="{}" height="240"></canvas>"#, chart.id),
        };

        format!(
            r#"
            <div class="card">
                <h3>{}</h3>
                <div class="subtitle">{}</div>
                {body}
            </div>
            "#,
            chart.title,
            escape_html(description)
        )
    }

    fn generate_cluster_info_card(
        snapshot: &DashboardSnapshot,
        overview: &ClusterOverview,
    ) -> String {
        let brokers_html = overview
            .brokers
            .brokers
            .iter()
            .map(|broker| {
                format!(
                    r#"<span class="badge">Broker {}</span>"#,
                    escape_html(&broker.display_id())
                )
            })
            .collect::<Vec<_>>()
            .join("");

        let source_file = snapshot
            .latest
            .as_ref()
            .map(|loaded| escape_html(&loaded.metadata.filename))
            .unwrap_or_default();

        format!(
            r#"
            <div class="card">
                <h3>🏢 Cluster Information</h3>
                <div class="subtitle">General cluster metadata and configuration</div>
                <div class="info-list">
                    <p><strong>🏢 Vendor:</strong> {}</p>
                    <p><strong>🆔 Cluster ID:</strong> {}</p>
                    <p><strong>👑 Controller:</strong> {}</p>
                    <p><strong>📅 Last Analysis:</strong> {}</p>
                    <p><strong>🖥️ Total Brokers:</strong> {}</p>
                    <p><strong>📄 Report:</strong> {source_file}</p>
                </div>
                <hr>
                <h4>📡 Broker Details:</h4>
                <div>{brokers_html}</div>
            </div>
            "#,
            escape_html(&overview.vendor),
            escape_html(&overview.brokers.cluster_id),
            escape_html(&overview.brokers.controller),
            escape_html(&overview.timestamp),
            overview.brokers.total_brokers
        )
    }

    fn generate_health_table_section(rows: &[HealthTableRow]) -> String {
        if rows.is_empty() {
            return r#"
                <div class="card">
                    <h3>📋 Detailed Health Checks</h3>
                    <p class="muted" style="text-align: center; padding: 1.5rem;">No health check details available</p>
                </div>
                "#
            .to_string();
        }

        let rows_html = rows
            .iter()
            .map(|row| {
                format!(
                    r#"
                    <tr class="status-{}" data-status="{}">
                        <td>{}</td>
                        <td>{}</td>
                        <td>{}</td>
                        <td>{}</td>
                    </tr>
                    "#,
                    row.status,
                    row.status,
                    escape_html(&row.status_label),
                    escape_html(&row.name),
                    escape_html(&row.message),
                    escape_html(&row.recommendation)
                )
            })
            .collect::<Vec<_>>()
            .join("");

        let status_options = crate::core::types::CheckStatus::ALL
            .iter()
            .map(|status| format!(r#"<option value="{status}">{status}</option>"#))
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"
            <div class="card">
                <h3>📋 Detailed Health Checks</h3>
                <div class="subtitle">Comprehensive analysis of cluster health</div>
                <div class="table-tools">
                    <input id="health-filter" type="search" placeholder="Filter checks...">
                    <select id="health-status-filter">
                        <option value="">All statuses</option>
                        {status_options}
                    </select>
                </div>
                <table id="health-table">
                    <thead>
                        <tr>
                            <th data-column="0">Status</th>
                            <th data-column="1">Health Check</th>
                            <th data-column="2">Message</th>
                            <th data-column="3">Recommendation</th>
                        </tr>
                    </thead>
                    <tbody>{rows_html}</tbody>
                </table>
                <div class="pager">
                    <button id="health-prev" class="btn btn-outline">‹ Prev</button>
                    <span id="health-page" class="muted"></span>
                    <button id="health-next" class="btn btn-outline">Next ›</button>
                </div>
            </div>
            "#
        )
    }

    fn generate_trends_section(charts: &[ChartSpec]) -> String {
        let cards = ["health-score-trend", "topics-trend"]
            .iter()
            .filter_map(|id| charts.iter().find(|chart| chart.id == *id))
            .map(|chart| {
                Self::generate_chart_card(chart, "Across all reports in the data directory")
            })
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"
            <h2 style="margin: 2rem 0 1rem;">📈 Trends</h2>
            <div class="grid grid-2">{cards}</div>
            "#
        )
    }

    fn generate_skipped_section(skipped: &[SkippedReport]) -> String {
        if skipped.is_empty() {
            return String::new();
        }

        let items = skipped
            .iter()
            .map(|entry| {
                format!(
                    "<li><code>{}</code>: {}</li>",
                    escape_html(&entry.path.display().to_string()),
                    escape_html(&entry.reason)
                )
            })
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"
            <div class="alert alert-warning">
                <strong>⚠️ {} report file(s) could not be loaded and were skipped:</strong>
                <ul>{items}</ul>
            </div>
            "#,
            skipped.len()
        )
    }

    fn generate_javascript() -> &'static str {
        r#"
        document.addEventListener('DOMContentLoaded', function() {
            const config = window.dashboardConfig || {};

            if (typeof Chart !== 'undefined') {
                (config.charts || []).forEach(function(spec) {
                    if (spec.emptyMessage) { return; }
                    const ctx = document.getElementById(spec.id);
                    if (!ctx) { return; }
                    const options = { responsive: true, plugins: { legend: { position: 'bottom' } } };
                    if (spec.kind === 'bar') { options.plugins.legend.display = false; }
                    if (spec.id === 'health-score-trend') { options.scales = { y: { min: 0, max: 100 } }; }
                    new Chart(ctx, {
                        type: spec.kind,
                        data: { labels: spec.labels, datasets: spec.datasets },
                        options: options
                    });
                });
            }

            const refreshButton = document.getElementById('refresh-button');
            if (refreshButton) {
                refreshButton.addEventListener('click', function() {
                    refreshButton.disabled = true;
                    fetch('/api/refresh', { method: 'POST' })
                        .finally(function() { window.location.reload(); });
                });
            }
            if (config.live && config.refreshIntervalMs > 0) {
                setTimeout(function() { window.location.reload(); }, config.refreshIntervalMs);
            }

            const table = document.getElementById('health-table');
            if (!table) { return; }
            const body = table.tBodies[0];
            const allRows = Array.from(body.rows);
            const textFilter = document.getElementById('health-filter');
            const statusFilter = document.getElementById('health-status-filter');
            const pageLabel = document.getElementById('health-page');
            const pageSize = config.pageSize || 15;
            let page = 0;
            let sortColumn = -1;
            let sortAscending = true;

            function visibleRows() {
                const needle = textFilter.value.toLowerCase();
                const status = statusFilter.value;
                return allRows.filter(function(row) {
                    if (status && row.dataset.status !== status) { return false; }
                    return !needle || row.textContent.toLowerCase().includes(needle);
                });
            }

            function render() {
                let rows = visibleRows();
                if (sortColumn >= 0) {
                    rows.sort(function(a, b) {
                        const left = a.cells[sortColumn].textContent.trim();
                        const right = b.cells[sortColumn].textContent.trim();
                        const order = left.localeCompare(right, undefined, { numeric: true });
                        return sortAscending ? order : -order;
                    });
                }
                const pages = Math.max(1, Math.ceil(rows.length / pageSize));
                page = Math.min(page, pages - 1);
                allRows.forEach(function(row) { row.style.display = 'none'; });
                rows.forEach(function(row, index) {
                    body.appendChild(row);
                    const onPage = Math.floor(index / pageSize) === page;
                    row.style.display = onPage ? '' : 'none';
                });
                pageLabel.textContent = 'Page ' + (page + 1) + ' of ' + pages + ' (' + rows.length + ' checks)';
            }

            textFilter.addEventListener('input', function() { page = 0; render(); });
            statusFilter.addEventListener('change', function() { page = 0; render(); });
            document.getElementById('health-prev').addEventListener('click', function() {
                page = Math.max(0, page - 1);
                render();
            });
            document.getElementById('health-next').addEventListener('click', function() {
                page += 1;
                render();
            });
            table.tHead.querySelectorAll('th').forEach(function(header) {
                header.addEventListener('click', function() {
                    const column = Number(header.dataset.column);
                    sortAscending = column === sortColumn ? !sortAscending : true;
                    sortColumn = column;
                    render();
                });
            });

            render();
        });
        "#
    }
}
