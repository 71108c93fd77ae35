use crate::models::MonthlyRecord;

pub fn render_dashboard(months_tracked: usize, latest: Option<&MonthlyRecord>) -> String {
    let month = latest.map(|record| record.month.as_str()).unwrap_or("--");
    let revenue = latest.and_then(|record| record.revenue);
    let expenses = latest.and_then(|record| record.expenses);
    let profit = match (revenue, expenses) {
        (Some(revenue), Some(expenses)) => Some(revenue - expenses),
        _ => None,
    };

    DASHBOARD_HTML
        .replace("{{MONTH}}", month)
        .replace("{{MONTHS}}", &months_tracked.to_string())
        .replace("{{REVENUE}}", &money(revenue))
        .replace("{{EXPENSES}}", &money(expenses))
        .replace("{{PROFIT}}", &money(profit))
}

fn money(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("${value:.2}"),
        None => "--".to_string(),
    }
}

const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>KPI Dashboard</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #10151b;
      --bg-2: #1b2430;
      --ink: #e8edf2;
      --muted: #8b98a5;
      --revenue: #35d0a5;
      --expenses: #e08a4c;
      --regression: #8884d8;
      --predicted: #e8c547;
      --card: #171e27;
      --border: rgba(139, 152, 165, 0.18);
      --shadow: 0 24px 60px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top right, var(--bg-2), transparent 55%),
        linear-gradient(160deg, var(--bg-1), #0c1014 70%);
      color: var(--ink);
      font-family: "Inter", "Helvetica Neue", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 26px;
    }

    header h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: var(--muted);
      font-size: 0.95rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 14px;
    }

    .stat {
      background: rgba(255, 255, 255, 0.03);
      border-radius: 16px;
      padding: 16px;
      border: 1px solid var(--border);
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.78rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: var(--muted);
    }

    .stat .value {
      font-size: 1.45rem;
      font-weight: 600;
    }

    .stat .value.profit {
      color: var(--revenue);
    }

    .chart-area {
      display: grid;
      gap: 14px;
    }

    .chart-header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 14px;
    }

    .chart-header h2 {
      margin: 0;
      font-size: 1.25rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 5px;
      background: rgba(255, 255, 255, 0.04);
      border-radius: 999px;
    }

    .tab {
      appearance: none;
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-size: 0.85rem;
      font-weight: 500;
      color: var(--muted);
      cursor: pointer;
    }

    .tab.active {
      background: rgba(255, 255, 255, 0.1);
      color: var(--ink);
    }

    .toggle {
      appearance: none;
      border: 1px solid var(--predicted);
      background: transparent;
      color: var(--predicted);
      border-radius: 999px;
      padding: 8px 16px;
      font-size: 0.85rem;
      font-weight: 600;
      cursor: pointer;
    }

    .toggle.on {
      background: var(--predicted);
      color: #151515;
    }

    .chart-card {
      background: rgba(255, 255, 255, 0.02);
      border-radius: 18px;
      padding: 16px;
      border: 1px solid var(--border);
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    #chart text {
      font-family: "Inter", "Helvetica Neue", sans-serif;
    }

    .chart-grid {
      stroke: rgba(139, 152, 165, 0.18);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 16px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .legend .swatch {
      display: inline-block;
      width: 12px;
      height: 3px;
      border-radius: 2px;
      margin-right: 6px;
      vertical-align: middle;
    }

    .chart-metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(170px, 1fr));
      gap: 14px;
    }

    .status {
      font-size: 0.9rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #e5604c;
    }

    .hint {
      margin: 0;
      color: var(--muted);
      font-size: 0.85rem;
    }

    @media (max-width: 640px) {
      .app {
        padding: 26px 20px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>KPI Dashboard</h1>
      <p class="subtitle">Monthly revenue, expenses and profit, with a least-squares revenue forecast.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Latest month</span>
        <span class="value">{{MONTH}}</span>
      </div>
      <div class="stat">
        <span class="label">Revenue</span>
        <span class="value">{{REVENUE}}</span>
      </div>
      <div class="stat">
        <span class="label">Expenses</span>
        <span class="value">{{EXPENSES}}</span>
      </div>
      <div class="stat">
        <span class="label">Profit</span>
        <span class="value profit">{{PROFIT}}</span>
      </div>
    </section>

    <section class="chart-area">
      <div class="chart-header">
        <div>
          <h2 id="chart-title">Revenue &amp; Expenses</h2>
          <p id="chart-subtitle" class="subtitle">Monthly revenue against expenses.</p>
        </div>
        <div class="tabs" role="tablist">
          <button class="tab active" type="button" data-tab="expenses" role="tab" aria-selected="true">Revenue &amp; Expenses</button>
          <button class="tab" type="button" data-tab="profit" role="tab" aria-selected="false">Revenue &amp; Profit</button>
          <button class="tab" type="button" data-tab="revenue" role="tab" aria-selected="false">Monthly Revenue</button>
          <button class="tab" type="button" data-tab="predictions" role="tab" aria-selected="false">Predictions</button>
        </div>
        <button class="toggle" type="button" id="predictions-toggle" hidden>Show predictions</button>
      </div>
      <div class="chart-card">
        <svg id="chart" viewBox="0 0 640 300" aria-label="KPI chart" role="img"></svg>
      </div>
      <div class="legend" id="legend"></div>
      <div class="chart-metrics">
        <div class="stat">
          <span class="label" id="metric-1-label">Total revenue</span>
          <span class="value" id="metric-1-value">--</span>
        </div>
        <div class="stat">
          <span class="label" id="metric-2-label">Total expenses</span>
          <span class="value" id="metric-2-value">--</span>
        </div>
        <div class="stat">
          <span class="label" id="metric-3-label">Net</span>
          <span class="value" id="metric-3-value">--</span>
        </div>
      </div>
    </section>

    <div class="status" id="status"></div>
    <p class="hint">{{MONTHS}} month(s) of data on record. The dashed forecast extends the fitted revenue line one horizon past the observed series.</p>
  </main>

  <script>
    const chartEl = document.getElementById('chart');
    const chartTitleEl = document.getElementById('chart-title');
    const chartSubtitleEl = document.getElementById('chart-subtitle');
    const legendEl = document.getElementById('legend');
    const statusEl = document.getElementById('status');
    const toggleEl = document.getElementById('predictions-toggle');
    const metric1Label = document.getElementById('metric-1-label');
    const metric1Value = document.getElementById('metric-1-value');
    const metric2Label = document.getElementById('metric-2-label');
    const metric2Value = document.getElementById('metric-2-value');
    const metric3Label = document.getElementById('metric-3-label');
    const metric3Value = document.getElementById('metric-3-value');
    const tabs = Array.from(document.querySelectorAll('.tab'));

    const colors = {
      revenue: getComputedStyle(document.documentElement).getPropertyValue('--revenue').trim(),
      expenses: getComputedStyle(document.documentElement).getPropertyValue('--expenses').trim(),
      regression: getComputedStyle(document.documentElement).getPropertyValue('--regression').trim(),
      predicted: getComputedStyle(document.documentElement).getPropertyValue('--predicted').trim()
    };

    let charts = null;
    let activeTab = 'expenses';
    let showPredictions = false;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const formatMoney = (value) => {
      if (typeof value !== 'number' || Number.isNaN(value)) {
        return '--';
      }
      return '$' + value.toFixed(2);
    };

    const formatAxisValue = (value) => {
      if (Math.abs(value) >= 1000) {
        return '$' + (value / 1000).toFixed(1) + 'k';
      }
      return '$' + Math.round(value);
    };

    // Each series: { label, color, points: (number|null)[], dots, dashed }.
    const renderChart = (labels, seriesList, options = {}) => {
      const values = [];
      seriesList.forEach((series) => {
        series.points.forEach((value) => {
          if (typeof value === 'number') {
            values.push(value);
          }
        });
      });

      if (!values.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        legendEl.innerHTML = '';
        return;
      }

      const width = 640;
      const height = 300;
      const paddingX = 52;
      const paddingY = 36;
      const top = 20;

      let min = Math.min(...values);
      let max = Math.max(...values);
      if (min === max) {
        min -= 1;
        max += 1;
      }
      const pad = (max - min) * 0.08;
      min -= pad;
      max += pad;
      const range = max - min;

      const slot = (width - paddingX * 2) / Math.max(labels.length, 1);
      const x = options.bars
        ? (index) => paddingX + slot * (index + 0.5)
        : (index) => paddingX + (labels.length > 1 ? ((width - paddingX * 2) / (labels.length - 1)) * index : (width - paddingX * 2) / 2);
      const y = (value) => height - paddingY - ((value - min) * (height - top - paddingY)) / range;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = min + (range * i) / ticks;
        const yPos = y(value);
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${yPos}" x2="${width - paddingX}" y2="${yPos}" />`;
        grid += `<text class="chart-label" x="${paddingX - 10}" y="${yPos + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const labelEvery = labels.length > 9 ? 2 : 1;
      const xLabels = labels
        .map((label, index) => {
          if (index % labelEvery !== 0 && index !== labels.length - 1) {
            return '';
          }
          return `<text class="chart-label" x="${x(index)}" y="${height - paddingY + 18}" text-anchor="middle">${label}</text>`;
        })
        .join('');

      let marks = '';
      seriesList.forEach((series) => {
        if (options.bars) {
          const barWidth = slot * 0.55;
          series.points.forEach((value, index) => {
            if (typeof value !== 'number') {
              return;
            }
            const x0 = x(index) - barWidth / 2;
            const y0 = y(Math.max(value, min));
            const base = y(Math.max(min, 0) > min ? 0 : min);
            marks += `<rect x="${x0.toFixed(2)}" y="${Math.min(y0, base).toFixed(2)}" width="${barWidth.toFixed(2)}" height="${Math.abs(base - y0).toFixed(2)}" rx="4" fill="${series.color}" opacity="0.85" />`;
          });
          return;
        }

        let path = '';
        let pen = false;
        series.points.forEach((value, index) => {
          if (typeof value !== 'number') {
            pen = false;
            return;
          }
          path += `${pen ? 'L' : 'M'} ${x(index).toFixed(2)} ${y(value).toFixed(2)} `;
          pen = true;
        });
        if (path && !series.dotsOnly) {
          const dash = series.dashed ? ' stroke-dasharray="6 6"' : '';
          marks += `<path d="${path.trim()}" fill="none" stroke="${series.color}" stroke-width="2.5"${dash} />`;
        }
        if (series.dots || series.dotsOnly) {
          series.points.forEach((value, index) => {
            if (typeof value !== 'number') {
              return;
            }
            marks += `<circle cx="${x(index).toFixed(2)}" cy="${y(value).toFixed(2)}" r="4" fill="${series.color}" />`;
          });
        }
      });

      chartEl.setAttribute('viewBox', `0 0 ${width} ${height}`);
      chartEl.innerHTML = `${grid}${marks}${xLabels}`;

      legendEl.innerHTML = seriesList
        .map((series) => `<span><span class="swatch" style="background:${series.color}"></span>${series.label}</span>`)
        .join('');
    };

    const setMetrics = (items) => {
      const targets = [
        [metric1Label, metric1Value],
        [metric2Label, metric2Value],
        [metric3Label, metric3Value]
      ];
      items.forEach((item, index) => {
        targets[index][0].textContent = item.label;
        targets[index][1].textContent = formatMoney(item.value);
      });
    };

    const sum = (values) => values.reduce((total, value) => total + value, 0);

    const renderRevenueExpenses = () => {
      const rows = charts.revenueExpenses;
      chartTitleEl.textContent = 'Revenue & Expenses';
      chartSubtitleEl.textContent = 'Monthly revenue against expenses.';
      renderChart(
        rows.map((row) => row.name),
        [
          { label: 'Revenue', color: colors.revenue, points: rows.map((row) => row.revenue), dots: true },
          { label: 'Expenses', color: colors.expenses, points: rows.map((row) => row.expenses), dots: true }
        ]
      );
      setMetrics([
        { label: 'Total revenue', value: sum(rows.map((row) => row.revenue)) },
        { label: 'Total expenses', value: sum(rows.map((row) => row.expenses)) },
        { label: 'Net', value: sum(rows.map((row) => row.revenue - row.expenses)) }
      ]);
    };

    const renderRevenueProfit = () => {
      const rows = charts.revenueProfit;
      chartTitleEl.textContent = 'Revenue & Profit';
      chartSubtitleEl.textContent = 'Profit is revenue minus expenses.';
      renderChart(
        rows.map((row) => row.name),
        [
          { label: 'Revenue', color: colors.revenue, points: rows.map((row) => row.revenue) },
          { label: 'Profit', color: colors.regression, points: rows.map((row) => row.profit) }
        ]
      );
      setMetrics([
        { label: 'Total revenue', value: sum(rows.map((row) => row.revenue)) },
        { label: 'Total profit', value: sum(rows.map((row) => row.profit)) },
        { label: 'Avg profit / month', value: rows.length ? sum(rows.map((row) => row.profit)) / rows.length : NaN }
      ]);
    };

    const renderRevenue = () => {
      const rows = charts.revenue;
      chartTitleEl.textContent = 'Monthly Revenue';
      chartSubtitleEl.textContent = 'Revenue by month.';
      renderChart(
        rows.map((row) => row.name),
        [{ label: 'Revenue', color: colors.revenue, points: rows.map((row) => row.revenue) }],
        { bars: true }
      );
      const best = rows.reduce((acc, row) => (acc === null || row.revenue > acc.revenue ? row : acc), null);
      setMetrics([
        { label: 'Total revenue', value: sum(rows.map((row) => row.revenue)) },
        { label: 'Avg / month', value: rows.length ? sum(rows.map((row) => row.revenue)) / rows.length : NaN },
        { label: best ? `Best month (${best.name})` : 'Best month', value: best ? best.revenue : NaN }
      ]);
    };

    const renderPredictions = () => {
      const rows = charts.predictions;
      chartTitleEl.textContent = 'Revenue Predictions';
      chartSubtitleEl.textContent = 'Actual revenue, fitted line, and the one-horizon forecast.';
      const seriesList = [
        { label: 'Actual revenue', color: colors.revenue, points: rows.map((row) => row.actualRevenue ?? null), dotsOnly: true },
        { label: 'Regression line', color: colors.regression, points: rows.map((row) => row.regressionLine ?? null) }
      ];
      if (showPredictions) {
        seriesList.push({
          label: 'Predicted revenue',
          color: colors.predicted,
          points: rows.map((row) => row.predictedRevenue ?? null),
          dashed: true,
          dots: true
        });
      }
      renderChart(rows.map((row) => row.name), seriesList);

      const history = rows.filter((row) => typeof row.actualRevenue === 'number');
      const forecast = rows.length ? rows[rows.length - 1] : null;
      setMetrics([
        { label: 'Latest revenue', value: history.length ? history[history.length - 1].actualRevenue : NaN },
        { label: 'Fitted latest', value: history.length ? history[history.length - 1].regressionLine : NaN },
        { label: 'Forecast', value: forecast && typeof forecast.predictedRevenue === 'number' ? forecast.predictedRevenue : NaN }
      ]);
    };

    const renderActiveTab = () => {
      if (!charts) {
        return;
      }
      toggleEl.hidden = activeTab !== 'predictions';
      if (activeTab === 'profit') {
        renderRevenueProfit();
      } else if (activeTab === 'revenue') {
        renderRevenue();
      } else if (activeTab === 'predictions') {
        renderPredictions();
      } else {
        renderRevenueExpenses();
      }
    };

    const setActiveTab = (tab) => {
      activeTab = tab;
      tabs.forEach((button) => {
        const isActive = button.dataset.tab === tab;
        button.classList.toggle('active', isActive);
        button.setAttribute('aria-selected', String(isActive));
      });
      renderActiveTab();
    };

    toggleEl.addEventListener('click', () => {
      showPredictions = !showPredictions;
      toggleEl.classList.toggle('on', showPredictions);
      toggleEl.textContent = showPredictions ? 'Hide predictions' : 'Show predictions';
      renderActiveTab();
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });

    const loadCharts = async () => {
      setStatus('Loading...', '');
      const res = await fetch('/api/charts');
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to load chart data');
      }
      charts = await res.json();
      setStatus('', '');
      renderActiveTab();
    };

    loadCharts().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
