use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::StreamExt;

use crate::error::{Error, Result};
use crate::state::AppState;

/// Which roster table an upload replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UploadKind {
    Crew,
    Equipment,
    Maintenance,
}

impl UploadKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "crew" => Ok(Self::Crew),
            "equipment" => Ok(Self::Equipment),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(Error::schema(format!("invalid upload kind '{}'", other))),
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Self::Crew => crate::config::CREW_FILE_NAME,
            Self::Equipment => crate::config::EQUIPMENT_FILE_NAME,
            Self::Maintenance => crate::config::MAINTENANCE_FILE_NAME,
        }
    }
}

/// HTTP handler wrapper that converts the internal result to an `HttpResponse`.
///
/// - On success: `200 OK` naming the replaced file.
/// - On failure: the error's response; the previous table stays live.
pub async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    match upload_roster_csv(&state, payload).await {
        Ok(kind) => {
            HttpResponse::Ok().body(format!("Uploaded and replaced {}", kind.file_name()))
        }
        Err(e) => e.to_response(),
    }
}

/// Read the multipart form and replace the roster table named by `kind`.
///
/// The file is buffered in full before anything is touched: replacement is
/// all-or-nothing, so nothing may change until the whole upload has parsed.
async fn upload_roster_csv(state: &AppState, mut payload: Multipart) -> Result<UploadKind> {
    let mut kind: Option<UploadKind> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| Error::schema(format!("multipart error: {}", e)))?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match field_name.as_deref() {
            Some("kind") => {
                let bytes = read_field(&mut field).await?;
                let value = String::from_utf8(bytes)
                    .map_err(|_| Error::schema("'kind' is not valid UTF-8"))?;
                kind = Some(UploadKind::parse(&value)?);
            }
            Some("file") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                if !filename.ends_with(".csv") {
                    return Err(Error::schema("the file must end with .csv"));
                }
                file_bytes = Some(read_field(&mut field).await?);
            }
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| Error::schema("missing 'kind' field"))?;
    let bytes = file_bytes.ok_or_else(|| Error::schema("missing 'file' field"))?;
    replace_table(state, kind, &bytes).await?;
    Ok(kind)
}

/// Apply a buffered upload to the roster under the write lock.
pub(crate) async fn replace_table(
    state: &AppState,
    kind: UploadKind,
    bytes: &[u8],
) -> Result<usize> {
    let mut roster = state.roster.write().await;
    match kind {
        UploadKind::Crew => roster.replace_crew(bytes),
        UploadKind::Equipment => roster.replace_equipment(bytes),
        UploadKind::Maintenance => roster.replace_maintenance_tasks(bytes),
    }
}

async fn read_field(field: &mut actix_multipart::Field) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| Error::schema(format!("multipart error: {}", e)))?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
