//! GDI pixel reads.

use super::{color_from_bgra, color_from_colorref};
use pixel_core::Color;
use std::ptr;
use windows_sys::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits,
    GetPixel, ReleaseDC, SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, CLR_INVALID,
    DIB_RGB_COLORS, RGBQUAD, SRCCOPY,
};

pub fn read_pixel(x: i32, y: i32) -> Option<Color> {
    // GetPixel fails on some layered/DPI-scaled setups; the blit path does not.
    read_pixel_direct(x, y).or_else(|| read_pixel_blit(x, y))
}

fn read_pixel_direct(x: i32, y: i32) -> Option<Color> {
    unsafe {
        let hdc = GetDC(ptr::null_mut());
        if hdc.is_null() {
            return None;
        }
        let color = GetPixel(hdc, x, y);
        ReleaseDC(ptr::null_mut(), hdc);

        (color != CLR_INVALID).then(|| color_from_colorref(color))
    }
}

fn read_pixel_blit(x: i32, y: i32) -> Option<Color> {
    unsafe {
        let hdc_screen = GetDC(ptr::null_mut());
        if hdc_screen.is_null() {
            return None;
        }

        let hdc_mem = CreateCompatibleDC(hdc_screen);
        if hdc_mem.is_null() {
            ReleaseDC(ptr::null_mut(), hdc_screen);
            return None;
        }

        let hbitmap = CreateCompatibleBitmap(hdc_screen, 1, 1);
        if hbitmap.is_null() {
            DeleteDC(hdc_mem);
            ReleaseDC(ptr::null_mut(), hdc_screen);
            return None;
        }

        let old_bitmap = SelectObject(hdc_mem, hbitmap);
        let copied = BitBlt(hdc_mem, 0, 0, 1, 1, hdc_screen, x, y, SRCCOPY);

        let mut bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: 1,
                biHeight: -1,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB,
                biSizeImage: 0,
                biXPelsPerMeter: 0,
                biYPelsPerMeter: 0,
                biClrUsed: 0,
                biClrImportant: 0,
            },
            bmiColors: [RGBQUAD {
                rgbBlue: 0,
                rgbGreen: 0,
                rgbRed: 0,
                rgbReserved: 0,
            }],
        };
        let mut pixel = [0u8; 4];
        let lines = GetDIBits(
            hdc_mem,
            hbitmap,
            0,
            1,
            pixel.as_mut_ptr() as *mut _,
            &mut bmi,
            DIB_RGB_COLORS,
        );

        SelectObject(hdc_mem, old_bitmap);
        DeleteObject(hbitmap);
        DeleteDC(hdc_mem);
        ReleaseDC(ptr::null_mut(), hdc_screen);

        if copied == 0 || lines == 0 {
            return None;
        }
        color_from_bgra(&pixel)
    }
}
