//! `/`: a static page listing the endpoints.

use axum::response::Html;

const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head><title>httpdump</title></head>
<body id="manpage">
<h1>httpdump(1): HTTP Request &amp; Response Service</h1>

<h2 id="ENDPOINTS">ENDPOINTS</h2>

<ul>
<li><a href="/"><code>/</code></a> This page.</li>
<li><a href="./ip"><code>/ip</code></a> Returns the origin address.</li>
<li><a href="./user-agent"><code>/user-agent</code></a> Returns the user-agent.</li>
<li><a href="./headers"><code>/headers</code></a> Returns the header map.</li>
<li><a href="./get"><code>/get</code></a> Returns the GET request snapshot.</li>
<li><a href="./gzip"><code>/gzip</code></a> Returns the snapshot gzip-encoded.</li>
<li><a href="./status/418"><code>/status/:code</code></a> Returns the given HTTP status code.</li>
<li><a href="./stream/20"><code>/stream/:n</code></a> Streams <em>min(n, 100)</em> snapshots.</li>
<li><a href="./bytes/1024"><code>/bytes/:n</code></a> Generates <em>n</em> random bytes (at most 102400); an optional <em>seed</em> integer makes the output reproducible.</li>
<li><a href="./redirect-to?url=http://example.com/"><code>/redirect-to?url=foo</code></a> 302 redirects to the <em>foo</em> URL.</li>
<li><a href="./basic-auth/user/passwd"><code>/basic-auth/:user/:passwd</code></a> Challenges HTTP Basic Auth.</li>
<li><a href="./hidden-basic-auth/user/passwd"><code>/hidden-basic-auth/:user/:passwd</code></a> 404s unless authenticated.</li>
<li><a href="./delay/3"><code>/delay/:n</code></a> Delays responding for <em>min(n, 10)</em> seconds.</li>
</ul>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX)
}
