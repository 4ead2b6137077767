use chrono::NaiveDate;

pub fn render_index(today: NaiveDate) -> String {
    INDEX_HTML.replace("{{TODAY}}", &today.to_string())
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>DE Analytics</title>
  <style>
    :root {
      --bg: #f4f6f7;
      --ink: #2b2a28;
      --accent: #0098aa;
      --accent-2: #db6619;
      --card: #ffffff;
      --muted: #6d929b;
      --shadow: 0 12px 32px rgba(0, 72, 88, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Helvetica Neue", Arial, sans-serif;
    }

    main {
      max-width: 1080px;
      margin: 0 auto;
      padding: 32px 20px 64px;
      display: grid;
      gap: 20px;
    }

    .panel {
      background: var(--card);
      border-radius: 12px;
      box-shadow: var(--shadow);
    }

    .panel-title {
      padding: 14px 20px;
      font-weight: 600;
      cursor: pointer;
      display: flex;
      justify-content: space-between;
      border-bottom: 1px solid #e3e8ea;
    }

    .panel-title::after {
      content: "\25B8";
      color: var(--muted);
    }

    .panel.expanded .panel-title::after {
      content: "\25BE";
    }

    .panel-body {
      padding: 16px 20px 20px;
      display: none;
    }

    .panel.expanded .panel-body {
      display: block;
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      align-items: center;
      margin-bottom: 12px;
    }

    .toolbar button.active {
      background: var(--accent);
      color: #fff;
    }

    button,
    input,
    select {
      font: inherit;
      padding: 6px 12px;
      border-radius: 6px;
      border: 1px solid #cacaca;
      background: #fff;
    }

    svg {
      width: 100%;
      height: 320px;
    }

    .chart-line {
      fill: none;
      stroke: var(--accent);
      stroke-width: 2;
    }

    .chart-bar {
      fill: var(--accent);
      fill-opacity: 0.8;
    }

    .chart-grid {
      stroke: #cacaca;
      stroke-dasharray: 2 3;
    }

    .chart-label {
      font-size: 11px;
      fill: var(--muted);
    }

    .counts {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 12px;
    }

    .count strong {
      display: block;
      font-size: 28px;
      color: var(--accent);
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th,
    td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid #e3e8ea;
    }

    .status {
      min-height: 20px;
      font-size: 14px;
      color: var(--accent-2);
    }

    #loader {
      font-size: 13px;
      color: var(--muted);
    }
  </style>
</head>
<body>
  <main>
    <section class="panel expanded">
      <div class="panel-title">Apps ran over time</div>
      <div class="panel-body">
        <div class="toolbar">
          <input id="app" value="all" aria-label="App" />
          <button id="day" data-kind="day" class="active">Day</button>
          <button id="month" data-kind="month">Month</button>
          <label><input type="radio" name="cursor" value="pan" checked /> Pan</label>
          <label><input type="radio" name="cursor" value="select" /> Select</label>
          <span>Since <span id="firstDate">-</span></span>
          <span id="loader">Loading...</span>
        </div>
        <svg id="chart" viewBox="0 0 960 320" role="img" aria-label="Chart"></svg>
        <div class="status" id="chart-status"></div>
      </div>
    </section>

    <section class="panel expanded">
      <div class="panel-title">Current apps</div>
      <div class="panel-body">
        <div class="counts">
          <div class="count">Running<strong id="running">-</strong></div>
          <div class="count">Submitted<strong id="submitted">-</strong></div>
          <div class="count">Failed<strong id="failed">-</strong></div>
          <div class="count">Completed<strong id="completed">-</strong></div>
        </div>
        <p id="running-apps"></p>
        <p id="submitted-apps"></p>
        <p id="failed-apps"></p>
      </div>
    </section>

    <section class="panel">
      <div class="panel-title">Tools by day</div>
      <div class="panel-body">
        <div class="toolbar">
          <input id="date" type="date" value="{{TODAY}}" max="{{TODAY}}" />
          <a id="csv" href="#">Export to CSV</a>
        </div>
        <div id="inner"></div>
      </div>
    </section>

    <section class="panel">
      <div class="panel-title">Integrators</div>
      <div class="panel-body">
        <div class="toolbar">
          <input id="integrator" placeholder="Integrator ID" aria-label="Integrator ID" />
          <button id="integrator-general">General Data</button>
          <a id="integrator-csv" href="#" hidden>Export to CSV</a>
        </div>
        <div id="integrator-body"></div>
      </div>
    </section>
  </main>

  <script>
    const chartEl = document.getElementById('chart');
    const chartStatus = document.getElementById('chart-status');
    const appInput = document.getElementById('app');
    const dateInput = document.getElementById('date');
    const APPS_REFRESH_MS = 36000;
    let kind = 'day';
    let current = null;

    document.querySelectorAll('.panel-title').forEach((title) => {
      title.addEventListener('click', () => title.parentElement.classList.toggle('expanded'));
    });

    const escapeHtml = (value) =>
      String(value).replace(/[&<>"']/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' })[c]);

    const renderChart = (data) => {
      const width = 960;
      const height = 320;
      const pad = 40;
      const zoom = data.zoom || { start: 0, end: data.points.length - 1 };
      const points = data.points.slice(zoom.start, zoom.end + 1);
      if (points.length === 0) {
        chartEl.innerHTML = '';
        return;
      }

      const max = Math.max(1, ...points.map((p) => p.count));
      const step = (width - pad * 2) / Math.max(1, points.length - (data.kind === 'monthly' ? 0 : 1));
      const x = (i) => pad + i * step;
      const y = (v) => height - pad - (v / max) * (height - pad * 2);

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = (max * i) / 4;
        grid += `<line class="chart-grid" x1="${pad}" y1="${y(value)}" x2="${width - pad}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${pad - 6}" y="${y(value) + 4}" text-anchor="end">${Math.round(value)}</text>`;
      }

      const labelEvery = Math.ceil(points.length / 10);
      const labels = points
        .map((p, i) => (i % labelEvery === 0
          ? `<text class="chart-label" x="${x(i)}" y="${pad - 12}" text-anchor="middle">${p.date.slice(data.kind === 'monthly' ? 0 : 5, data.kind === 'monthly' ? 7 : 10)}</text>`
          : ''))
        .join('');

      let body;
      if (data.kind === 'monthly') {
        body = points
          .map((p, i) => `<rect class="chart-bar" x="${x(i) + 2}" y="${y(p.count)}" width="${Math.max(1, step - 4)}" height="${height - pad - y(p.count)}"><title>${p.date}: ${p.count}</title></rect>`)
          .join('');
      } else {
        const path = points.map((p, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(2)} ${y(p.count).toFixed(2)}`).join(' ');
        body = `<path class="chart-line" d="${path}" />`;
      }

      chartEl.innerHTML = `${grid}${body}${labels}`;
    };

    const chartUrl = (suffix) => `/api/charts/${encodeURIComponent(appInput.value)}/${kind}${suffix}`;

    const loadChart = async () => {
      chartEl.innerHTML = '';
      chartStatus.textContent = '';
      document.getElementById('loader').style.display = '';
      const res = await fetch(`/api/${kind}-data/${encodeURIComponent(appInput.value)}`);
      if (!res.ok) {
        throw new Error(await res.text() || 'Unable to load chart');
      }
      current = await res.json();
      document.getElementById('firstDate').textContent = current.first_date || '-';
      renderChart(current);
      await fetch(chartUrl('/rendered'), { method: 'POST' });
      document.getElementById('loader').style.display = 'none';
    };

    const loadApps = async () => {
      const res = await fetch('/api/apps');
      if (!res.ok) {
        return;
      }
      const apps = await res.json();
      ['running', 'submitted', 'failed', 'completed'].forEach((key) => {
        document.getElementById(key).textContent = apps[key];
      });
      document.getElementById('running-apps').textContent = apps.running_apps;
      document.getElementById('submitted-apps').textContent = apps.submitted_apps;
      document.getElementById('failed-apps').textContent = apps.failed_apps;
    };

    const loadInfo = async () => {
      const date = dateInput.value;
      document.getElementById('csv').href = `/api/info/${date}/csv`;
      const res = await fetch(`/api/info/${date}`);
      const inner = document.getElementById('inner');
      if (!res.ok) {
        inner.textContent = await res.text();
        return;
      }
      const info = await res.json();
      if (info.message) {
        inner.textContent = info.message;
        return;
      }
      const rows = info.tools.map((t) => `<tr><td>${escapeHtml(t.name)}</td><td>${t.count}</td></tr>`).join('');
      inner.innerHTML = `<table><thead><tr><th>Name</th><th>Count</th></tr></thead><tbody>${rows}</tbody></table>`;
    };

    const integratorBody = document.getElementById('integrator-body');
    const integratorCsv = document.getElementById('integrator-csv');

    const loadIntegratorTotals = async () => {
      integratorCsv.hidden = true;
      const res = await fetch('/api/integrators');
      if (!res.ok) {
        integratorBody.textContent = await res.text();
        return;
      }
      const totals = await res.json();
      integratorBody.innerHTML = `<h3>General Integrator Info</h3><ul>
        <li>In total, integrators have contributed <strong>${totals.total}</strong> applications.</li>
        <li>On average, integrators create about <strong>${totals.average.toPrecision(2)}</strong> applications.</li>
      </ul>`;
    };

    const loadIntegrator = async (id) => {
      if (!id) {
        return loadIntegratorTotals();
      }
      const res = await fetch(`/api/integrators/${encodeURIComponent(id)}`);
      if (!res.ok) {
        integratorCsv.hidden = true;
        integratorBody.textContent = await res.text();
        return;
      }
      const who = await res.json();
      integratorCsv.href = `/api/integrators/${encodeURIComponent(id)}/csv`;
      integratorCsv.hidden = false;
      const rows = who.apps
        .map((a) => `<tr><td title="${escapeHtml(a.description)}">${a.wiki_url ? `<a href="${escapeHtml(a.wiki_url)}">${escapeHtml(a.name)}</a>` : escapeHtml(a.name)}</td><td>${a.rating.toFixed(2)}/5</td><td>${escapeHtml(a.job_type)}</td><td>${a.created}</td></tr>`)
        .join('');
      integratorBody.innerHTML = `<h3>${escapeHtml(who.name)}</h3>
        <p>Email: ${escapeHtml(who.email)}<br />Integrator ID: ${escapeHtml(who.id)}</p>
        <table><thead><tr><th>Name</th><th>Rating</th><th>Type</th><th>Created</th></tr></thead><tbody>${rows}</tbody></table>`;
    };

    document.getElementById('integrator').addEventListener('change', (event) => {
      loadIntegrator(event.target.value.trim()).catch(() => {});
    });
    document.getElementById('integrator-general').addEventListener('click', () => {
      document.getElementById('integrator').value = '';
      loadIntegratorTotals().catch(() => {});
    });

    document.querySelectorAll('[data-kind]').forEach((button) => {
      button.addEventListener('click', () => {
        kind = button.dataset.kind;
        document.querySelectorAll('[data-kind]').forEach((b) => b.classList.toggle('active', b === button));
        loadChart().catch((err) => { chartStatus.textContent = err.message; });
      });
    });

    document.querySelectorAll('input[name="cursor"]').forEach((radio) => {
      radio.addEventListener('change', () => {
        if (!current) {
          return;
        }
        fetch(chartUrl('/cursor'), {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ mode: radio.value })
        }).catch((err) => { chartStatus.textContent = err.message; });
      });
    });

    appInput.addEventListener('change', () => loadChart().catch((err) => { chartStatus.textContent = err.message; }));
    dateInput.addEventListener('change', () => loadInfo().catch(() => {}));

    loadChart().catch((err) => { chartStatus.textContent = err.message; });
    loadApps().catch(() => {});
    setInterval(() => loadApps().catch(() => {}), APPS_REFRESH_MS);
    loadInfo().catch(() => {});
    loadIntegratorTotals().catch(() => {});
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_caps_date_picker_at_today() {
        let html = render_index(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(html.contains(r#"value="2024-02-29" max="2024-02-29""#));
        assert!(!html.contains("{{TODAY}}"));
    }

    #[test]
    fn index_has_integrator_panel() {
        let html = render_index(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(html.contains("/api/integrators"));
        assert!(html.contains(r#"id="integrator-body""#));
    }
}
