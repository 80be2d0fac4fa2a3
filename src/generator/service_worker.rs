//! Service worker script

use anyhow::Result;

use crate::config::SiteConfig;

const TEMPLATE: &str = r#"const CACHE_NAME = __CACHE_NAME__;
const STATIC_ASSETS = __PRECACHE__;

self.addEventListener('install', event => {
  event.waitUntil(
    caches.open(CACHE_NAME)
      .then(cache => cache.addAll(STATIC_ASSETS))
      .then(() => self.skipWaiting())
  );
});

self.addEventListener('activate', event => {
  event.waitUntil(
    caches.keys().then(keys =>
      Promise.all(keys.filter(key => key !== CACHE_NAME).map(key => caches.delete(key)))
    ).then(() => self.clients.claim())
  );
});

self.addEventListener('fetch', event => {
  if (event.request.method !== 'GET') return;

  const url = new URL(event.request.url);
  const isHtmlRequest = event.request.headers.get('accept')?.includes('text/html') ||
                        url.pathname.endsWith('.html') ||
                        url.pathname === '/' ||
                        !url.pathname.includes('.');

  event.respondWith(
    caches.match(event.request).then(cached => {
      const fetched = fetch(event.request).then(response => {
        if (response.ok) {
          const clone = response.clone();
          caches.open(CACHE_NAME).then(cache => cache.put(event.request, clone));
        } else if (response.status === 404 && isHtmlRequest) {
          return caches.match('/404.html');
        }
        return response;
      }).catch(() => {
        if (isHtmlRequest && !cached) {
          return caches.match('/404.html');
        }
        return cached;
      });

      return cached || fetched;
    })
  );
});
"#;

/// Render the worker with the configured cache name and precache list.
///
/// Responses are served from cache first and refreshed from the network;
/// page requests that miss fall back to `/404.html`.
pub fn render(config: &SiteConfig) -> Result<String> {
    let cache_name = serde_json::to_string(&config.build.cache_name)?;
    let precache = serde_json::to_string_pretty(&config.build.precache)?;

    Ok(TEMPLATE
        .replace("__CACHE_NAME__", &cache_name)
        .replace("__PRECACHE__", &precache))
}
