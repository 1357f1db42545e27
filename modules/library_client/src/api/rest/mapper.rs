//! Mapper implementations for converting between DTOs and contract models
//!
//! Conversions go both ways: responses are decoded into contract models, and
//! contract models are turned back into DTOs when they are printed or served.

use super::dto::*;
use crate::contract;

// ===== Listing conversions =====

impl From<ImagePageDto> for contract::ImagePage {
    fn from(dto: ImagePageDto) -> Self {
        Self {
            page: dto.page,
            page_size: dto.page_size,
            total: dto.total,
            items: dto.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<contract::ImagePage> for ImagePageDto {
    fn from(page: contract::ImagePage) -> Self {
        Self {
            page: page.page,
            page_size: page.page_size,
            total: page.total,
            items: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ImageSummaryDto> for contract::ImageSummary {
    fn from(dto: ImageSummaryDto) -> Self {
        Self {
            id: dto.id,
            path: dto.path,
            file_name: dto.file_name,
            ext: dto.ext,
            width: dto.width,
            height: dto.height,
            model_name: dto.model_name,
            prompt: dto.prompt,
            nsfw: dto.nsfw,
            thumb_url: dto.thumb_url,
        }
    }
}

impl From<contract::ImageSummary> for ImageSummaryDto {
    fn from(item: contract::ImageSummary) -> Self {
        Self {
            id: item.id,
            path: item.path,
            file_name: item.file_name,
            ext: item.ext,
            width: item.width,
            height: item.height,
            model_name: item.model_name,
            prompt: item.prompt,
            nsfw: item.nsfw,
            thumb_url: item.thumb_url,
        }
    }
}

// ===== Image conversions =====

impl From<ImageDto> for contract::Image {
    fn from(dto: ImageDto) -> Self {
        // The detail endpoint nests the model as an object; flatten its name.
        let model_name = dto.model_name.or_else(|| {
            dto.extra
                .get("model")
                .and_then(|m| m.get("name"))
                .and_then(|n| n.as_str())
                .map(str::to_string)
        });

        Self {
            id: dto.id,
            path: dto.path,
            file_name: dto.file_name,
            ext: dto.ext,
            size_bytes: dto.size_bytes,
            sha256: dto.sha256,
            width: dto.width,
            height: dto.height,
            created_time: dto.created_time,
            imported_at: dto.imported_at,
            model_name,
            prompt: dto.prompt,
            negative_prompt: dto.negative_prompt,
            rating: dto.rating,
            nsfw: dto.nsfw,
            hidden: dto.hidden,
            tags: dto.tags.into_iter().map(Into::into).collect(),
            loras: dto.loras.into_iter().map(Into::into).collect(),
            extra: dto.extra,
        }
    }
}

impl From<contract::Image> for ImageDto {
    fn from(image: contract::Image) -> Self {
        Self {
            id: image.id,
            path: image.path,
            file_name: image.file_name,
            ext: image.ext,
            size_bytes: image.size_bytes,
            sha256: image.sha256,
            width: image.width,
            height: image.height,
            created_time: image.created_time,
            imported_at: image.imported_at,
            model_name: image.model_name,
            prompt: image.prompt,
            negative_prompt: image.negative_prompt,
            rating: image.rating,
            nsfw: image.nsfw,
            hidden: image.hidden,
            tags: image.tags.into_iter().map(Into::into).collect(),
            loras: image.loras.into_iter().map(Into::into).collect(),
            extra: image.extra,
        }
    }
}

impl From<TagDto> for contract::Tag {
    fn from(dto: TagDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
        }
    }
}

impl From<contract::Tag> for TagDto {
    fn from(tag: contract::Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

impl From<LoraDto> for contract::Lora {
    fn from(dto: LoraDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            hash: dto.hash,
            weight: dto.weight,
        }
    }
}

impl From<contract::Lora> for LoraDto {
    fn from(lora: contract::Lora) -> Self {
        Self {
            id: lora.id,
            name: lora.name,
            hash: lora.hash,
            weight: lora.weight,
        }
    }
}

// ===== Request conversions =====

impl From<&contract::LibraryImport> for LibraryImportDto {
    fn from(import: &contract::LibraryImport) -> Self {
        Self {
            path: import.path.clone(),
            folder: import.folder.clone(),
        }
    }
}

// ===== Maintenance conversions =====

impl From<ScanSummaryDto> for contract::ScanSummary {
    fn from(dto: ScanSummaryDto) -> Self {
        Self { count: dto.count }
    }
}

impl From<contract::ScanSummary> for ScanSummaryDto {
    fn from(summary: contract::ScanSummary) -> Self {
        Self {
            count: summary.count,
        }
    }
}

impl From<WatcherStatusDto> for contract::WatcherStatus {
    fn from(dto: WatcherStatusDto) -> Self {
        Self {
            running: dto.running,
        }
    }
}

impl From<contract::WatcherStatus> for WatcherStatusDto {
    fn from(status: contract::WatcherStatus) -> Self {
        Self {
            running: status.running,
        }
    }
}
