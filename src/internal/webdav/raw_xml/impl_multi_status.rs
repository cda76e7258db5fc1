use url::Url;

use crate::internal::remote_file::structs::RemoteFileData;
use crate::internal::webdav::functions::format_url_path::href_to_remote_path;
use crate::webdav::structs::{MultiStatus, Prop, PropStat, Response};

pub trait ToRemoteFileData {
    /// 整理为领域结构体；请求路径本身也会出现在结果中，由调用方按路径过滤
    fn to_remote_file_data(self, base_url: &Url) -> Vec<RemoteFileData>;
}

fn take_ok_propstat(propstats: Vec<PropStat>) -> Option<PropStat> {
    // 从 propstats 中拿到第一个 HTTP 状态是 2xx 的 PropStat（直接 move 出来）
    propstats.into_iter().find(|ps| {
        ps.status
            .split_whitespace()
            .find_map(|t| t.parse::<u16>().ok())
            .map(|code| (200..=299).contains(&code))
            .unwrap_or(false)
    })
}

fn clean_etag(raw: Option<String>) -> Option<String> {
    // 去掉 ETag 的首尾引号、弱校验前缀以及多余空格
    raw.map(|s| s.trim().trim_start_matches("W/").trim_matches('"').to_string())
}

impl ToRemoteFileData for MultiStatus {
    fn to_remote_file_data(self, base_url: &Url) -> Vec<RemoteFileData> {
        let mut resources = Vec::new();

        for Response { href, propstats } in self.responses {
            // 没有 2xx 状态就跳过
            let Some(PropStat { prop, .. }) = take_ok_propstat(propstats) else {
                continue;
            };

            let Prop {
                resource_type,
                content_length: size,
                last_modified,
                content_type: mime,
                etag,
                ..
            } = prop;

            let is_dir = resource_type
                .as_ref()
                .and_then(|rt| rt.is_collection.as_ref())
                .is_some();

            let path = href_to_remote_path(base_url, &href);
            let name = path.name().to_string();

            resources.push(RemoteFileData {
                path,
                name,
                is_dir,
                size,
                last_modified,
                mime,
                etag: clean_etag(etag),
            });
        }

        resources
    }
}
