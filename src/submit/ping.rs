// src/submit/ping.rs
// The legacy update-ping broadcast list. Most of these XML-RPC era services
// are dead or moribund; the broadcast is fire-and-forget and individual
// failures are never recorded, so stale entries cost nothing.

pub const PING_ENDPOINTS: &[&str] = &[
    "http://rpc.pingomatic.com",
    "http://blogsearch.google.com/ping/RPC2",
    "http://rpc.weblogs.com/RPC2",
    "http://ping.blo.gs/",
    "http://ping.feedburner.com",
    "http://rpc.twingly.com",
    "http://api.moreover.com/RPC2",
    "http://api.moreover.com/ping",
    "http://www.blogdigger.com/RPC2",
    "http://www.blogshares.com/rpc.php",
    "http://www.blogsnow.com/ping",
    "http://www.blogstreet.com/xrbin/xmlrpc.cgi",
    "http://bulkfeeds.net/rpc",
    "http://www.newsisfree.com/xmlrpctest.php",
    "http://ping.bitacoras.com",
    "http://ping.syndic8.com/xmlrpc.php",
    "http://ping.weblogalot.com/rpc.php",
    "http://rpc.blogrolling.com/pinger/",
    "http://rpc.technorati.com/rpc/ping",
    "http://topicexchange.com/RPC2",
    "http://www.syndic8.com/xmlrpc.php",
    "http://xping.pubsub.com/ping/",
    "http://ping.blogs.yandex.ru/RPC2",
    "http://blog.goo.ne.jp/XMLRPC",
    "http://www.a2b.cc/setloc/bp.a2b",
    "http://www.blogoole.com/ping/",
];
